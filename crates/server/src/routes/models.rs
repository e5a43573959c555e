use actix_web::{get, HttpResponse};
use screencode_llm::{DEFAULT_CODE_MODEL, DEFAULT_VISION_MODEL};

use crate::types::{DefaultModels, ModelsResponse};

/// Vision-capable models offered by the page
const VISION_MODELS: &[&str] = &[
    DEFAULT_VISION_MODEL,
    "Qwen/Qwen3-VL-30B-A3B-Instruct",
    "Qwen/Qwen3-VL-235B-A22B-Instruct",
    "Qwen/Qwen3-VL-235B-A22B-Thinking",
    "Qwen/Qwen3-Omni-30B-A3B-Captioner",
];

/// Code models offered by the page
const CODE_MODELS: &[&str] = &[
    DEFAULT_CODE_MODEL,
    "Qwen/Qwen3-Coder-30B-A3B-Instruct",
    "moonshotai/Kimi-K2-Instruct-0905",
];

/// GET /models - selectable models and stage defaults
///
/// Advisory only: any model string is forwarded to the remote API.
#[get("/models")]
pub async fn get_models() -> HttpResponse {
    HttpResponse::Ok().json(ModelsResponse {
        vision_models: VISION_MODELS.iter().map(|m| m.to_string()).collect(),
        code_models: CODE_MODELS.iter().map(|m| m.to_string()).collect(),
        default: DefaultModels {
            vision: DEFAULT_VISION_MODEL.to_string(),
            code: DEFAULT_CODE_MODEL.to_string(),
        },
    })
}
