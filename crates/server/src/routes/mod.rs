mod describe;
mod generate;
mod index;
mod models;
mod revise;

pub use describe::generate_description;
pub use generate::generate_html;
pub use index::index_page;
pub use models::get_models;
pub use revise::code_model_chat;

use actix_web::{http::StatusCode, HttpResponse};
use screencode_common::ScreencodeError;
use tracing::{error, warn};

use crate::types::ErrorResponse;

/// Render a failure envelope; internal details stay in the log
pub(crate) fn error_response(err: &ScreencodeError) -> HttpResponse {
    let message = match err {
        ScreencodeError::InvalidInput(message) => {
            warn!("Rejected request: {}", message);
            message.clone()
        }
        ScreencodeError::GenerationFailed(_) => {
            error!("{}", err);
            err.to_string()
        }
        other => {
            error!("Request failed: {}", other);
            "Internal server error".to_string()
        }
    };

    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    HttpResponse::build(status).json(ErrorResponse { error: message })
}
