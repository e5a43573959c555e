use async_trait::async_trait;
use reqwest::Client;
use screencode_common::{Result, ScreencodeError};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::credential::Credential;
use crate::llm_trait::InferenceBackend;
use crate::types::{ChatRequest, ChatResponse, TextRequest, VisionRequest};

/// Chat-completion API client (SiliconFlow / OpenAI compatible)
#[derive(Debug, Clone)]
pub struct InferenceClient {
    endpoint: String,
    client: Client,
}

impl InferenceClient {
    /// Create new client for `endpoint`, the full chat-completion URL
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let endpoint = endpoint.into();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ScreencodeError::config(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            "Inference client initialized: {} (timeout {:?})",
            endpoint, timeout
        );
        Ok(Self { endpoint, client })
    }

    /// Send one request and pull the first choice's text out of the reply
    async fn complete(&self, credential: &Credential, request: &ChatRequest) -> Result<String> {
        debug!(
            "Sending chat completion - Model: {}, Messages: {}",
            request.model,
            request.messages.len()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(credential.expose())
            .json(request)
            .send()
            .await
            .map_err(|e| ScreencodeError::transport(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Remote API returned {} for model {}", status, request.model);
            return Err(ScreencodeError::upstream_status(status.as_u16(), body));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ScreencodeError::transport(format!("Failed to read response body: {}", e)))?;

        let envelope: ChatResponse = serde_json::from_slice(&body)
            .map_err(|e| ScreencodeError::response_shape(format!("Response is not a chat completion: {}", e)))?;

        let content = envelope
            .first_content()
            .ok_or_else(|| ScreencodeError::response_shape("Response has no choices[0].message.content"))?;

        debug!(
            "Received chat completion - Model: {}, Length: {}",
            request.model,
            content.len()
        );

        Ok(content.to_string())
    }
}

#[async_trait]
impl InferenceBackend for InferenceClient {
    async fn invoke_vision_model(
        &self,
        credential: &Credential,
        request: VisionRequest<'_>,
    ) -> Result<String> {
        self.complete(credential, &request.to_chat_request()).await
    }

    async fn invoke_text_model(
        &self,
        credential: &Credential,
        request: TextRequest<'_>,
    ) -> Result<String> {
        self.complete(credential, &request.to_chat_request()).await
    }
}
