use screencode_common::{Result, ScreencodeError};
use std::fmt;
use std::sync::Arc;
use tracing::{error, info};

use crate::credential::Credential;
use crate::image::ImagePayload;
use crate::llm_trait::InferenceBackend;
use crate::prompts::{markup_prompt, revision_prompt, DESCRIBE_INSTRUCTION};
use crate::sampling::{CodeSampling, VisionSampling, DEFAULT_MAX_OUTPUT_TOKENS};
use crate::types::{TextRequest, VisionRequest};

/// Vision model used when the caller names none
pub const DEFAULT_VISION_MODEL: &str = "Qwen/Qwen3-VL-32B-Thinking";

/// Code model used when the caller names none
pub const DEFAULT_CODE_MODEL: &str = "Qwen/Qwen3-Coder-480B-A35B-Instruct";

/// Pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// image → structured description
    Describe,
    /// description → markup
    Generate,
    /// markup + instruction → markup
    Revise,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Describe => "describe",
            Self::Generate => "generate",
            Self::Revise => "revise",
        }
    }

    fn fallback_model(&self) -> &'static str {
        match self {
            Self::Describe => DEFAULT_VISION_MODEL,
            Self::Generate | Self::Revise => DEFAULT_CODE_MODEL,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pick the caller's model, or the stage default when it is absent or blank
pub fn default_model(stage: Stage, requested: Option<&str>) -> &str {
    match requested.map(str::trim) {
        Some(model) if !model.is_empty() => model,
        _ => stage.fallback_model(),
    }
}

/// Describe → Generate → Revise over an inference backend
///
/// Stateless: every stage is one backend call. The caller carries the
/// description and markup between stages, and any stage may be called on
/// its own.
#[derive(Clone)]
pub struct Pipeline {
    backend: Arc<dyn InferenceBackend>,
    max_output_tokens: u32,
}

impl Pipeline {
    pub fn new(backend: Arc<dyn InferenceBackend>) -> Self {
        Self {
            backend,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }

    /// Override the `max_tokens` cap sent with text-model calls
    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    /// Ask the vision model for a structured description of the screenshot
    pub async fn describe_interface(
        &self,
        credential: &Credential,
        image: &ImagePayload,
        model: Option<&str>,
        sampling: VisionSampling,
    ) -> Result<String> {
        let stage = Stage::Describe;
        let model = default_model(stage, model);
        let sampling = sampling.resolve();

        info!(
            "Stage {} - Model: {}, Image: {} bytes ({})",
            stage,
            model,
            image.len(),
            image.mime()
        );

        let request = VisionRequest {
            system_instruction: DESCRIBE_INSTRUCTION,
            user_text: "",
            image,
            model,
            temperature: sampling.temperature,
            top_p: sampling.top_p,
            top_k: sampling.top_k,
        };

        let result = self.backend.invoke_vision_model(credential, request).await;
        finish(stage, result)
    }

    /// Ask the code model for HTML matching `description`
    pub async fn synthesize_markup(
        &self,
        credential: &Credential,
        description: &str,
        model: Option<&str>,
        sampling: CodeSampling,
    ) -> Result<String> {
        let prompt = markup_prompt(description);
        self.run_text_stage(Stage::Generate, credential, &prompt, model, sampling)
            .await
    }

    /// Ask the code model to apply `instruction` to `markup`
    pub async fn revise_markup(
        &self,
        credential: &Credential,
        markup: &str,
        instruction: &str,
        model: Option<&str>,
        sampling: CodeSampling,
    ) -> Result<String> {
        let prompt = revision_prompt(markup, instruction);
        self.run_text_stage(Stage::Revise, credential, &prompt, model, sampling)
            .await
    }

    async fn run_text_stage(
        &self,
        stage: Stage,
        credential: &Credential,
        prompt: &str,
        model: Option<&str>,
        sampling: CodeSampling,
    ) -> Result<String> {
        let model = default_model(stage, model);
        let sampling = sampling.resolve();

        info!(
            "Stage {} - Model: {}, Prompt length: {}",
            stage,
            model,
            prompt.len()
        );

        let request = TextRequest {
            user_text: prompt,
            model,
            temperature: sampling.temperature,
            max_tokens: self.max_output_tokens,
        };

        let result = self.backend.invoke_text_model(credential, request).await;
        finish(stage, result)
    }
}

/// Pass text through untouched; collapse any failure into `GenerationFailed`.
/// The full error goes to the log, callers get its summary.
fn finish(stage: Stage, result: Result<String>) -> Result<String> {
    match result {
        Ok(text) => {
            info!("Stage {} completed - Output length: {}", stage, text.len());
            Ok(text)
        }
        Err(e) => {
            error!("Stage {} failed: {}", stage, e);
            Err(match e {
                already @ ScreencodeError::GenerationFailed(_) => already,
                other => ScreencodeError::generation_failed(other.summary()),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records every call and answers from a script
    #[derive(Default)]
    struct ScriptedBackend {
        vision_reply: Option<String>,
        text_reply: Option<String>,
        echo_markup: bool,
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl InferenceBackend for ScriptedBackend {
        async fn invoke_vision_model(
            &self,
            _credential: &Credential,
            request: VisionRequest<'_>,
        ) -> Result<String> {
            self.seen.lock().unwrap().push(format!(
                "vision|{}|{}|{}|{}|{}",
                request.model, request.temperature, request.top_p, request.top_k, request.user_text
            ));
            self.vision_reply
                .clone()
                .ok_or_else(|| ScreencodeError::upstream_status(503, "busy"))
        }

        async fn invoke_text_model(
            &self,
            _credential: &Credential,
            request: TextRequest<'_>,
        ) -> Result<String> {
            self.seen.lock().unwrap().push(format!(
                "text|{}|{}|{}",
                request.model, request.temperature, request.max_tokens
            ));
            if self.echo_markup {
                let start = request.user_text.find("HTML:\n").map(|i| i + 6).unwrap_or(0);
                let end = request
                    .user_text
                    .find("\n\nInstruction:\n")
                    .unwrap_or(request.user_text.len());
                return Ok(request.user_text[start..end].to_string());
            }
            self.text_reply
                .clone()
                .ok_or_else(|| ScreencodeError::transport("connection refused"))
        }
    }

    fn credential() -> Credential {
        Credential::new("sk-test").unwrap()
    }

    fn image() -> ImagePayload {
        ImagePayload::new(vec![0x89, b'P', b'N', b'G'], "image/png")
    }

    #[test]
    fn test_default_model_selection() {
        assert_eq!(default_model(Stage::Describe, None), DEFAULT_VISION_MODEL);
        assert_eq!(default_model(Stage::Generate, Some("")), DEFAULT_CODE_MODEL);
        assert_eq!(default_model(Stage::Revise, Some("  ")), DEFAULT_CODE_MODEL);
        assert_eq!(default_model(Stage::Revise, Some("custom/coder")), "custom/coder");
    }

    #[tokio::test]
    async fn test_describe_applies_defaults() {
        let backend = Arc::new(ScriptedBackend {
            vision_reply: Some("desc".to_string()),
            ..Default::default()
        });
        let pipeline = Pipeline::new(backend.clone());

        let text = pipeline
            .describe_interface(&credential(), &image(), None, VisionSampling::default())
            .await
            .unwrap();

        assert_eq!(text, "desc");
        let seen = backend.seen.lock().unwrap();
        assert_eq!(seen[0], format!("vision|{}|0.15|0.3|50|", DEFAULT_VISION_MODEL));
    }

    #[tokio::test]
    async fn test_text_stage_uses_max_output_tokens() {
        let backend = Arc::new(ScriptedBackend {
            text_reply: Some("<p/>".to_string()),
            ..Default::default()
        });
        let pipeline = Pipeline::new(backend.clone()).with_max_output_tokens(1024);

        pipeline
            .synthesize_markup(&credential(), "d", Some("m"), CodeSampling { temperature: Some(1.2) })
            .await
            .unwrap();

        assert_eq!(backend.seen.lock().unwrap()[0], "text|m|1.2|1024");
    }

    #[tokio::test]
    async fn test_failures_become_generation_failed() {
        let pipeline = Pipeline::new(Arc::new(ScriptedBackend::default()));

        let err = pipeline
            .describe_interface(&credential(), &image(), None, VisionSampling::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ScreencodeError::GenerationFailed(ref m) if m.contains("503") && !m.contains("busy")));

        let err = pipeline
            .revise_markup(&credential(), "<a/>", "x", None, CodeSampling::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ScreencodeError::GenerationFailed(ref m) if m.contains("connection refused")));
    }

    #[tokio::test]
    async fn test_revise_twice_with_echo_is_identity() {
        let pipeline = Pipeline::new(Arc::new(ScriptedBackend {
            echo_markup: true,
            ..Default::default()
        }));
        let markup = "<div>A</div>\n<span>b</span>";

        let once = pipeline
            .revise_markup(&credential(), markup, "keep it", None, CodeSampling::default())
            .await
            .unwrap();
        let twice = pipeline
            .revise_markup(&credential(), &once, "keep it", None, CodeSampling::default())
            .await
            .unwrap();

        assert_eq!(once, markup);
        assert_eq!(twice, markup);
    }
}
