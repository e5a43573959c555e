use actix_web::{post, web, HttpResponse};
use screencode_common::Result;
use screencode_llm::CodeSampling;

use super::error_response;
use crate::form::{FormFields, TextForm};
use crate::state::AppState;
use crate::types::HtmlResponse;

/// Generate stage: UI description → HTML
#[post("/generate_html")]
pub async fn generate_html(form: TextForm, state: web::Data<AppState>) -> HttpResponse {
    match generate(form, &state).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => error_response(&e),
    }
}

async fn generate(form: TextForm, state: &AppState) -> Result<HtmlResponse> {
    let fields = FormFields::from_text_form(form, state.form_limits()).await?;
    let credential = fields.credential()?;
    let description = fields.required_text("ui_description", "UI description is required")?;
    let sampling = CodeSampling {
        temperature: fields.optional_f64("code_temperature")?,
    };

    let html_code = state
        .pipeline
        .synthesize_markup(&credential, description, fields.text("code_model"), sampling)
        .await?;

    Ok(HtmlResponse { html_code })
}
