//! Completion client: the seam between the pipeline and the remote VLM.
//!
//! The pipeline talks to [`CompletionClient`], a small object-safe trait.
//! Production code uses [`OpenAiClient`], which speaks the OpenAI-compatible
//! `/chat/completions` wire format over HTTPS; tests substitute scripted
//! implementations. The client is an explicitly constructed, caller-owned
//! object — there is no process-wide singleton and no hidden environment
//! lookup inside the library.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// One multimodal page request: a fixed instruction plus an encoded image.
///
/// This is the domain-level shape; [`OpenAiClient`] maps it onto the wire
/// format. Keeping it provider-neutral lets alternative clients reuse it
/// unchanged.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Model identifier, e.g. "gpt-4o".
    pub model: String,
    /// Sampling temperature (0.0 for deterministic transcription).
    pub temperature: f32,
    /// Optional completion-token cap.
    pub max_tokens: Option<u32>,
    /// System-role instruction.
    pub system: String,
    /// User-turn directive text accompanying the image.
    pub directive: String,
    /// Page image as a base64 data URI (`data:image/png;base64,…`).
    pub image_data_uri: String,
}

/// Errors from a completion client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure (connection, TLS, request build).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// The response parsed but contained no usable completion: an empty
    /// `choices` array or a missing `message.content`.
    #[error("API response contained no completion content")]
    EmptyResponse,
}

/// A vision-capable chat-completion service.
///
/// `Send + Sync` so an `Arc<dyn CompletionClient>` can be shared freely;
/// the extractor itself only ever has one request in flight.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Submit one page request and return the raw completion text
    /// (untrimmed — the page processor owns whitespace handling).
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ClientError>;
}

// ── Wire types ───────────────────────────────────────────────────────────
//
// Minimal subset of the chat-completions schema: one system message, one
// user message carrying a text part and an image part.

#[derive(Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    messages: Vec<WireMessage<'a>>,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: WireContent<'a>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum WireContent<'a> {
    Text(&'a str),
    Parts(Vec<WirePart<'a>>),
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WirePart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: WireImageUrl<'a> },
}

#[derive(Serialize)]
struct WireImageUrl<'a> {
    url: &'a str,
}

#[derive(Deserialize)]
struct WireResponse {
    #[serde(default)]
    choices: Vec<WireChoice>,
}

#[derive(Deserialize)]
struct WireChoice {
    message: WireResponseMessage,
}

#[derive(Deserialize)]
struct WireResponseMessage {
    content: Option<String>,
}

// ── Production client ────────────────────────────────────────────────────

/// Production [`CompletionClient`] over an OpenAI-compatible HTTP endpoint.
///
/// No request timeout is configured beyond reqwest's defaults; callers who
/// need one can build their own `reqwest::Client` behaviour behind the
/// trait.
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    api_base: String,
}

impl OpenAiClient {
    /// Create a client for the default OpenAI endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_api_base(api_key, crate::config::DEFAULT_API_BASE)
    }

    /// Create a client for an alternative OpenAI-compatible endpoint.
    pub fn with_api_base(api_key: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ClientError> {
        let body = WireRequest {
            model: &request.model,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            messages: vec![
                WireMessage {
                    role: "system",
                    content: WireContent::Text(&request.system),
                },
                WireMessage {
                    role: "user",
                    content: WireContent::Parts(vec![
                        WirePart::Text {
                            text: &request.directive,
                        },
                        WirePart::ImageUrl {
                            image_url: WireImageUrl {
                                url: &request.image_data_uri,
                            },
                        },
                    ]),
                },
            ],
        };

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                body: truncate(&body, 500),
            });
        }

        let parsed: WireResponse = response.json().await?;
        debug!("Completion response with {} choice(s)", parsed.choices.len());

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(ClientError::EmptyResponse)
    }
}

/// Cap error-body excerpts so a failing proxy can't flood logs.
fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        let mut end = max;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}…", &s[..end])
    }
}
