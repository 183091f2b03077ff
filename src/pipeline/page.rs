//! Page processor: one rasterised page in, one document record out.
//!
//! This stage converts a page image into a VLM API call and packages the
//! returned Markdown into a [`Document`]. It is intentionally thin — all
//! prompt wording lives in [`crate::prompts`] so it can change without
//! touching the request-assembly or error path here.
//!
//! Unlike pipelines that tolerate individual bad pages, failure here is
//! terminal: the error is logged with the page number and source, then
//! returned as a [`PageFailure`] which the orchestrator propagates without
//! processing further pages.

use crate::client::{CompletionClient, CompletionRequest};
use crate::config::ExtractorConfig;
use crate::document::Document;
use crate::error::PageFailure;
use crate::pipeline::encode;
use crate::prompts::{PAGE_DIRECTIVE, SYSTEM_PROMPT};
use image::DynamicImage;
use std::time::Instant;
use tracing::{debug, error};

/// Extract one page into a [`Document`].
///
/// Encodes `image` as a PNG data URI, submits it with the fixed directive
/// at temperature 0, trims the returned text, and attaches `page_number`
/// (1-based) and `source` (the input's base file name) as metadata.
///
/// Any encoding or API error becomes a [`PageFailure`] carrying the page
/// number, source, and cause.
pub async fn process_page(
    client: &dyn CompletionClient,
    config: &ExtractorConfig,
    image: &DynamicImage,
    page_number: usize,
    source: &str,
) -> Result<Document, PageFailure> {
    let start = Instant::now();

    let image_data_uri = encode::encode_page(image).map_err(|e| {
        let failure = PageFailure {
            page: page_number,
            source: source.to_string(),
            cause: format!("image encoding failed: {}", e),
        };
        error!(page = page_number, source, "{}", failure.cause);
        failure
    })?;

    let request = CompletionRequest {
        model: config.model.clone(),
        temperature: config.temperature,
        max_tokens: config.max_tokens,
        system: config
            .system_prompt
            .clone()
            .unwrap_or_else(|| SYSTEM_PROMPT.to_string()),
        directive: PAGE_DIRECTIVE.to_string(),
        image_data_uri,
    };

    match client.complete(&request).await {
        Ok(content) => {
            debug!(
                page = page_number,
                source,
                chars = content.len(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Page extracted"
            );
            Ok(Document::new(content, page_number, source))
        }
        Err(e) => {
            error!(page = page_number, source, "Extraction failed: {}", e);
            Err(PageFailure {
                page: page_number,
                source: source.to_string(),
                cause: e.to_string(),
            })
        }
    }
}
