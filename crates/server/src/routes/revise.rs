use actix_web::{post, web, HttpResponse};
use screencode_common::Result;
use screencode_llm::CodeSampling;

use super::error_response;
use crate::form::{FormFields, TextForm};
use crate::state::AppState;
use crate::types::RevisionResponse;

/// Revise stage: HTML + instruction → updated HTML
#[post("/code_model_chat")]
pub async fn code_model_chat(form: TextForm, state: web::Data<AppState>) -> HttpResponse {
    match revise(form, &state).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => error_response(&e),
    }
}

async fn revise(form: TextForm, state: &AppState) -> Result<RevisionResponse> {
    let fields = FormFields::from_text_form(form, state.form_limits()).await?;
    let credential = fields.credential()?;
    let html_code = fields.required_text("html_code", "HTML code is required")?;
    let instruction = fields.required_text("instruction", "Instruction is required")?;
    let sampling = CodeSampling {
        temperature: fields.optional_f64("code_temperature")?,
    };

    let updated_html = state
        .pipeline
        .revise_markup(
            &credential,
            html_code,
            instruction,
            fields.text("code_model"),
            sampling,
        )
        .await?;

    Ok(RevisionResponse { updated_html })
}
