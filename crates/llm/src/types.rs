use serde::{Deserialize, Serialize};

use crate::image::ImagePayload;

/// Chat-completion request body
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model identifier (e.g., "Qwen/Qwen3-VL-32B-Thinking")
    pub model: String,

    /// Ordered conversation
    pub messages: Vec<ChatMessage>,

    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    /// Nucleus sampling threshold
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,

    /// Top-k sampling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<i64>,

    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// One role-tagged message
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: MessageContent,
}

impl ChatMessage {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: MessageContent::Text(text.into()),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Text(text.into()),
        }
    }

    pub fn user_blocks(blocks: Vec<ContentBlock>) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Blocks(blocks),
        }
    }
}

/// Message content: a plain string for text-only calls, typed blocks for
/// multimodal ones
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
}

/// Typed content block
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

/// Image reference; `url` carries a data URI
#[derive(Debug, Clone, Serialize)]
pub struct ImageUrl {
    pub url: String,
}

/// Chat-completion response envelope
///
/// Only the fields this crate reads are modelled, and all of them are
/// optional so that a missing field surfaces as a shape error instead of a
/// JSON error.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatResponse {
    /// Text of the first choice, if present
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.as_ref())
            .and_then(|message| message.content.as_deref())
    }
}

/// Vision-model call: fixed instruction, free text and one image
#[derive(Debug, Clone)]
pub struct VisionRequest<'a> {
    pub system_instruction: &'a str,
    pub user_text: &'a str,
    pub image: &'a ImagePayload,
    pub model: &'a str,
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: i64,
}

impl VisionRequest<'_> {
    /// Build the wire body: system message, then user text followed by the image
    pub fn to_chat_request(&self) -> ChatRequest {
        ChatRequest {
            model: self.model.to_string(),
            messages: vec![
                ChatMessage::system(self.system_instruction),
                ChatMessage::user_blocks(vec![
                    ContentBlock::Text {
                        text: self.user_text.to_string(),
                    },
                    ContentBlock::ImageUrl {
                        image_url: ImageUrl {
                            url: self.image.to_data_uri(),
                        },
                    },
                ]),
            ],
            temperature: Some(self.temperature),
            top_p: Some(self.top_p),
            top_k: Some(self.top_k),
            max_tokens: None,
        }
    }
}

/// Text-model call: a single user message
#[derive(Debug, Clone)]
pub struct TextRequest<'a> {
    pub user_text: &'a str,
    pub model: &'a str,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl TextRequest<'_> {
    pub fn to_chat_request(&self) -> ChatRequest {
        ChatRequest {
            model: self.model.to_string(),
            messages: vec![ChatMessage::user(self.user_text)],
            temperature: Some(self.temperature),
            top_p: None,
            top_k: None,
            max_tokens: Some(self.max_tokens),
        }
    }
}
