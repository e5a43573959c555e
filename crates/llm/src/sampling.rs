//! Sampling parameters and their per-stage defaults
//!
//! Values are never validated or clamped. Whatever the caller supplies is
//! forwarded to the remote model, which may reject it.

/// Describe-stage temperature
pub const DEFAULT_VISION_TEMPERATURE: f64 = 0.15;

/// Describe-stage top_p
pub const DEFAULT_VISION_TOP_P: f64 = 0.3;

/// Describe-stage top_k
pub const DEFAULT_VISION_TOP_K: i64 = 50;

/// Generate/Revise-stage temperature
pub const DEFAULT_CODE_TEMPERATURE: f64 = 0.7;

/// Generate/Revise-stage `max_tokens`
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 8048;

/// Sampling for the vision model; `None` selects the default
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VisionSampling {
    pub temperature: Option<f64>,
    pub top_p: Option<f64>,
    pub top_k: Option<i64>,
}

/// Vision sampling with every default applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedVisionSampling {
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: i64,
}

impl VisionSampling {
    pub fn resolve(self) -> ResolvedVisionSampling {
        ResolvedVisionSampling {
            temperature: self.temperature.unwrap_or(DEFAULT_VISION_TEMPERATURE),
            top_p: self.top_p.unwrap_or(DEFAULT_VISION_TOP_P),
            top_k: self.top_k.unwrap_or(DEFAULT_VISION_TOP_K),
        }
    }
}

/// Sampling for the code model; only temperature is exposed
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CodeSampling {
    pub temperature: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedCodeSampling {
    pub temperature: f64,
}

impl CodeSampling {
    pub fn resolve(self) -> ResolvedCodeSampling {
        ResolvedCodeSampling {
            temperature: self.temperature.unwrap_or(DEFAULT_CODE_TEMPERATURE),
        }
    }
}
