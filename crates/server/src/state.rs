use screencode_common::{AppConfig, Result};
use screencode_llm::{InferenceBackend, InferenceClient, Pipeline};
use std::sync::Arc;

use crate::form::FormLimits;

/// Shared application state, built once at startup
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,

    /// Describe / generate / revise stages
    pub pipeline: Pipeline,
}

impl AppState {
    /// Create state backed by the configured remote endpoint
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = InferenceClient::new(&config.inference_api_url, config.inference_timeout())?;
        Ok(Self::with_backend(config, Arc::new(client)))
    }

    /// Create state over any backend
    pub fn with_backend(config: AppConfig, backend: Arc<dyn InferenceBackend>) -> Self {
        let pipeline = Pipeline::new(backend).with_max_output_tokens(config.max_output_tokens);
        Self { config, pipeline }
    }

    pub fn form_limits(&self) -> FormLimits {
        FormLimits {
            max_file_bytes: self.config.max_image_bytes,
            max_text_bytes: self.config.max_form_bytes,
        }
    }
}
