//! Screencode inference pipeline
//!
//! Chat-completion client for vision and code models, plus the three
//! fixed-prompt stages built on it: describe, generate, revise.

mod client;
mod credential;
mod image;
mod llm_trait;
mod pipeline;
mod prompts;
mod sampling;
mod types;

pub use client::InferenceClient;
pub use credential::Credential;
pub use image::ImagePayload;
pub use llm_trait::InferenceBackend;
pub use pipeline::{default_model, Pipeline, Stage, DEFAULT_CODE_MODEL, DEFAULT_VISION_MODEL};
pub use prompts::{markup_prompt, revision_prompt, DESCRIBE_INSTRUCTION};
pub use sampling::{
    CodeSampling, ResolvedCodeSampling, ResolvedVisionSampling, VisionSampling,
    DEFAULT_CODE_TEMPERATURE, DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_VISION_TEMPERATURE,
    DEFAULT_VISION_TOP_K, DEFAULT_VISION_TOP_P,
};
pub use types::{
    ChatMessage, ChatRequest, ChatResponse, ContentBlock, ImageUrl, MessageContent, Role,
    TextRequest, VisionRequest,
};
