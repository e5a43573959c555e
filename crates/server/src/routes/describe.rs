use actix_multipart::Multipart;
use actix_web::{post, web, HttpResponse};
use screencode_common::{Result, ScreencodeError};
use screencode_llm::{ImagePayload, VisionSampling};
use tracing::info;

use super::error_response;
use crate::form::FormFields;
use crate::state::AppState;
use crate::types::DescriptionResponse;

/// Describe stage: screenshot → structured UI description
#[post("/generate_description")]
pub async fn generate_description(payload: Multipart, state: web::Data<AppState>) -> HttpResponse {
    match describe(payload, &state).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => error_response(&e),
    }
}

async fn describe(payload: Multipart, state: &AppState) -> Result<DescriptionResponse> {
    let mut fields = FormFields::from_multipart(payload, state.form_limits(), &["image"]).await?;
    let credential = fields.credential()?;
    let upload = fields
        .take_file("image")
        .ok_or_else(|| ScreencodeError::invalid_input("Please upload an image"))?;
    let sampling = VisionSampling {
        temperature: fields.optional_f64("vlm_temperature")?,
        top_p: fields.optional_f64("vlm_top_p")?,
        top_k: fields.optional_i64("vlm_top_k")?,
    };

    let image = ImagePayload::from_upload(upload.bytes, upload.filename.as_deref());
    info!(
        "Describe request - Image: {} bytes ({}), Filename: {:?}",
        image.len(),
        image.mime(),
        upload.filename
    );

    let ui_description = state
        .pipeline
        .describe_interface(&credential, &image, fields.text("vlm_model"), sampling)
        .await?;

    Ok(DescriptionResponse {
        ui_description,
        image_base64: image.to_base64(),
    })
}
