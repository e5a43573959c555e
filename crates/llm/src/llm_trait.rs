use async_trait::async_trait;
use screencode_common::Result;

use crate::credential::Credential;
use crate::types::{TextRequest, VisionRequest};

/// Remote chat-completion backend
///
/// Vision and text calls stay separate because the wire shapes differ: the
/// user content is a list of typed blocks in one and a plain string in the
/// other.
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    /// System instruction + user text + image; returns the reply text
    async fn invoke_vision_model(
        &self,
        credential: &Credential,
        request: VisionRequest<'_>,
    ) -> Result<String>;

    /// Single user message; returns the reply text
    async fn invoke_text_model(
        &self,
        credential: &Credential,
        request: TextRequest<'_>,
    ) -> Result<String>;
}
