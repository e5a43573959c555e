use crate::error::ScreencodeError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default chat-completion endpoint
pub const DEFAULT_INFERENCE_API_URL: &str = "https://api.siliconflow.cn/v1/chat/completions";

/// Screencode application configuration
///
/// Holds no API credentials; callers supply those per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server bind address
    pub server_host: String,

    /// Server port
    pub server_port: u16,

    /// Chat-completion endpoint URL
    pub inference_api_url: String,

    /// Outbound request timeout in seconds
    pub inference_timeout_secs: u64,

    /// `max_tokens` sent with text-model requests
    pub max_output_tokens: u32,

    /// Largest accepted image upload in bytes
    pub max_image_bytes: usize,

    /// Largest accepted text form body / field in bytes
    pub max_form_bytes: usize,

    /// Log directory
    pub log_dir: PathBuf,

    /// Log level
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_host: "127.0.0.1".to_string(),
            server_port: 5000,
            inference_api_url: DEFAULT_INFERENCE_API_URL.to_string(),
            inference_timeout_secs: 600,
            max_output_tokens: 8048,
            max_image_bytes: 20 * 1024 * 1024,
            max_form_bytes: 4 * 1024 * 1024,
            log_dir: PathBuf::from("./log"),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Result<Self, ScreencodeError> {
        // Load .env file (ignore if not exists)
        let _ = dotenv::dotenv();

        let defaults = Self::default();
        let config = Self {
            server_host: std::env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: Self::get_env_parsed("SERVER_PORT")?.unwrap_or(defaults.server_port),
            inference_api_url: std::env::var("INFERENCE_API_URL")
                .unwrap_or(defaults.inference_api_url),
            inference_timeout_secs: Self::get_env_parsed("INFERENCE_TIMEOUT_SECS")?
                .unwrap_or(defaults.inference_timeout_secs),
            max_output_tokens: Self::get_env_parsed("MAX_OUTPUT_TOKENS")?
                .unwrap_or(defaults.max_output_tokens),
            max_image_bytes: Self::get_env_parsed("MAX_IMAGE_BYTES")?
                .unwrap_or(defaults.max_image_bytes),
            max_form_bytes: Self::get_env_parsed("MAX_FORM_BYTES")?
                .unwrap_or(defaults.max_form_bytes),
            log_dir: std::env::var("LOG_DIR")
                .ok()
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
        };

        config.validate()?;

        Ok(config)
    }

    /// Parse an environment variable, failing loudly on garbage
    fn get_env_parsed<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ScreencodeError> {
        match std::env::var(key) {
            Ok(raw) if !raw.trim().is_empty() => raw
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| ScreencodeError::config(format!("{} has invalid value '{}'", key, raw))),
            _ => Ok(None),
        }
    }

    /// Get server bind address (host:port)
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Outbound request timeout
    pub fn inference_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.inference_timeout_secs)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ScreencodeError> {
        if !self.inference_api_url.starts_with("http://")
            && !self.inference_api_url.starts_with("https://")
        {
            return Err(ScreencodeError::config(
                "Inference API URL must start with http:// or https://",
            ));
        }

        if self.server_port == 0 {
            return Err(ScreencodeError::config("Server port cannot be 0"));
        }

        if self.inference_timeout_secs == 0 {
            return Err(ScreencodeError::config("Inference timeout cannot be 0"));
        }

        if self.max_image_bytes == 0 || self.max_form_bytes == 0 {
            return Err(ScreencodeError::config("Upload limits must be greater than 0"));
        }

        Ok(())
    }
}
