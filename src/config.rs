//! Configuration for PDF page extraction.
//!
//! All behaviour is controlled through [`ExtractorConfig`], built via its
//! [`ExtractorConfigBuilder`]. Keeping every knob in one struct makes it
//! trivial to share configs across calls and to diff two runs to understand
//! why their outputs differ.

use crate::error::ExtractError;
use std::fmt;

/// Default model when the caller does not pick one: a general-purpose
/// vision-capable model.
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Default endpoint base for the OpenAI-compatible chat-completions API.
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Configuration for a [`crate::PdfExtractor`].
///
/// Built via [`ExtractorConfig::builder()`].
///
/// # Example
/// ```rust
/// use pagelens::ExtractorConfig;
///
/// let config = ExtractorConfig::builder()
///     .api_key("sk-test")
///     .model("gpt-4o-mini")
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ExtractorConfig {
    /// API credential sent as a bearer token with every request. Required;
    /// there is no default and no environment fallback in the library.
    pub api_key: String,

    /// Model identifier for the completion request. Default: [`DEFAULT_MODEL`].
    pub model: String,

    /// Base URL of the chat-completions endpoint. Default: [`DEFAULT_API_BASE`].
    ///
    /// Point this at any OpenAI-compatible gateway (Azure front-ends,
    /// OpenRouter, local inference servers) without changing code.
    pub api_base: String,

    /// Sampling temperature. Default: 0.0.
    ///
    /// Zero makes the model deterministic and faithful to what it sees on
    /// the page — exactly what you want for transcription.
    pub temperature: f32,

    /// Optional cap on tokens the model may generate per page. Default: None
    /// (provider default applies).
    pub max_tokens: Option<u32>,

    /// Maximum rendered page dimension (width or height) in pixels. Default: 2000.
    ///
    /// A safety cap independent of page size: an A0 poster rendered
    /// unconstrained could produce a 13 000 × 18 000 px image and exhaust
    /// memory. Either dimension is capped, the other scales proportionally.
    pub max_rendered_pixels: u32,

    /// Custom system prompt. If None, uses [`crate::prompts::SYSTEM_PROMPT`].
    pub system_prompt: Option<String>,
}

impl ExtractorConfig {
    /// Create a new builder.
    pub fn builder() -> ExtractorConfigBuilder {
        ExtractorConfigBuilder {
            config: ExtractorConfig {
                api_key: String::new(),
                model: DEFAULT_MODEL.to_string(),
                api_base: DEFAULT_API_BASE.to_string(),
                temperature: 0.0,
                max_tokens: None,
                max_rendered_pixels: 2000,
                system_prompt: None,
            },
        }
    }
}

// api_key must never leak into logs.
impl fmt::Debug for ExtractorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractorConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("max_rendered_pixels", &self.max_rendered_pixels)
            .field("system_prompt", &self.system_prompt.as_ref().map(|_| "<custom>"))
            .finish()
    }
}

/// Builder for [`ExtractorConfig`].
#[derive(Debug)]
pub struct ExtractorConfigBuilder {
    config: ExtractorConfig,
}

impl ExtractorConfigBuilder {
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn api_base(mut self, base: impl Into<String>) -> Self {
        self.config.api_base = base.into();
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.config.temperature = t.clamp(0.0, 2.0);
        self
    }

    pub fn max_tokens(mut self, n: u32) -> Self {
        self.config.max_tokens = Some(n);
        self
    }

    pub fn max_rendered_pixels(mut self, px: u32) -> Self {
        self.config.max_rendered_pixels = px.max(100);
        self
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = Some(prompt.into());
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ExtractorConfig, ExtractError> {
        let c = &self.config;
        if c.api_key.trim().is_empty() {
            return Err(ExtractError::InvalidConfig(
                "api_key is required and has no default".into(),
            ));
        }
        if c.model.trim().is_empty() {
            return Err(ExtractError::InvalidConfig("model must not be empty".into()));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let config = ExtractorConfig::builder().api_key("sk-test").build().unwrap();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.temperature, 0.0);
        assert_eq!(config.max_tokens, None);
        assert_eq!(config.max_rendered_pixels, 2000);
    }

    #[test]
    fn missing_api_key_rejected() {
        let err = ExtractorConfig::builder().build().unwrap_err();
        assert!(err.to_string().contains("api_key"));
    }

    #[test]
    fn temperature_is_clamped() {
        let config = ExtractorConfig::builder()
            .api_key("sk-test")
            .temperature(-1.0)
            .build()
            .unwrap();
        assert_eq!(config.temperature, 0.0);
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = ExtractorConfig::builder()
            .api_key("sk-very-secret")
            .build()
            .unwrap();
        let dump = format!("{:?}", config);
        assert!(!dump.contains("sk-very-secret"));
        assert!(dump.contains("<redacted>"));
    }
}
