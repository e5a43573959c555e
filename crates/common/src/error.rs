/// Upstream response bodies are cut to this many characters before being
/// stored in an error.
const MAX_BODY_CHARS: usize = 512;

/// Screencode error types
#[derive(Debug, thiserror::Error)]
pub enum ScreencodeError {
    /// Required field missing, empty or malformed at the boundary
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Outbound request failed before a response arrived
    #[error("Transport error: {0}")]
    Transport(String),

    /// Remote API answered with a non-success status
    #[error("Remote API returned status {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    /// Remote API answered 2xx but without the expected generated text
    #[error("Unexpected response shape: {0}")]
    ResponseShape(String),

    /// A pipeline stage failed; carries the underlying message
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScreencodeError {
    /// Create invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create transport error
    pub fn transport<S: Into<String>>(msg: S) -> Self {
        Self::Transport(msg.into())
    }

    /// Create upstream status error, truncating the body
    pub fn upstream_status<S: AsRef<str>>(status: u16, body: S) -> Self {
        let body = body.as_ref().trim();
        let body = match body.char_indices().nth(MAX_BODY_CHARS) {
            Some((idx, _)) => format!("{}...", &body[..idx]),
            None => body.to_string(),
        };
        Self::UpstreamStatus { status, body }
    }

    /// Create response shape error
    pub fn response_shape<S: Into<String>>(msg: S) -> Self {
        Self::ResponseShape(msg.into())
    }

    /// Collapse any error into a generation failure, keeping its message
    pub fn generation_failed(err: impl std::fmt::Display) -> Self {
        match err.to_string() {
            msg if msg.is_empty() => Self::GenerationFailed("unknown error".to_string()),
            msg => Self::GenerationFailed(msg),
        }
    }

    /// Create config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Short form for callers: upstream bodies stay out, everything else
    /// reads as its `Display`
    pub fn summary(&self) -> String {
        match self {
            Self::UpstreamStatus { status, .. } => {
                format!("Remote API returned status {}", status)
            }
            other => other.to_string(),
        }
    }
}

impl ScreencodeError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::Transport(_) => 502,
            Self::UpstreamStatus { .. } => 502,
            Self::ResponseShape(_) => 502,
            Self::GenerationFailed(_) => 500,
            Self::Config(_) => 500,
            Self::Io(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_body_is_truncated() {
        let body = "x".repeat(MAX_BODY_CHARS + 100);
        let err = ScreencodeError::upstream_status(500, &body);
        match err {
            ScreencodeError::UpstreamStatus { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body.chars().count(), MAX_BODY_CHARS + 3);
                assert!(body.ends_with("..."));
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_upstream_body_multibyte_boundary() {
        let body = "가".repeat(MAX_BODY_CHARS + 1);
        let err = ScreencodeError::upstream_status(429, body);
        assert!(err.to_string().starts_with("Remote API returned status 429: 가"));
    }

    #[test]
    fn test_generation_failed_keeps_message() {
        let inner = ScreencodeError::upstream_status(401, "invalid api key");
        let err = ScreencodeError::generation_failed(&inner);
        assert_eq!(
            err.to_string(),
            "Generation failed: Remote API returned status 401: invalid api key"
        );
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_summary_drops_upstream_body() {
        let err = ScreencodeError::upstream_status(503, "overloaded, retry at host-7");
        assert_eq!(err.summary(), "Remote API returned status 503");

        let err = ScreencodeError::transport("connection refused");
        assert_eq!(err.summary(), "Transport error: connection refused");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ScreencodeError::invalid_input("missing").status_code(), 400);
        assert_eq!(ScreencodeError::transport("timeout").status_code(), 502);
        assert_eq!(ScreencodeError::response_shape("no choices").status_code(), 502);
        assert_eq!(ScreencodeError::config("bad").status_code(), 500);
    }
}
