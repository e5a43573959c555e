use serde::{Deserialize, Serialize};

/// `/generate_description` success body
#[derive(Debug, Serialize, Deserialize)]
pub struct DescriptionResponse {
    /// Structured UI description from the vision model
    pub ui_description: String,

    /// The uploaded image, base64 encoded
    pub image_base64: String,
}

/// `/generate_html` success body
#[derive(Debug, Serialize, Deserialize)]
pub struct HtmlResponse {
    pub html_code: String,
}

/// `/code_model_chat` success body
#[derive(Debug, Serialize, Deserialize)]
pub struct RevisionResponse {
    pub updated_html: String,
}

/// Failure body for every route
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// `/models` body
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelsResponse {
    pub vision_models: Vec<String>,
    pub code_models: Vec<String>,
    pub default: DefaultModels,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DefaultModels {
    pub vision: String,
    pub code: String,
}
