//! # pagelens
//!
//! Extract per-page Markdown documents from PDFs using Vision Language Models (VLMs).
//!
//! ## Why this crate?
//!
//! Traditional PDF-to-text tools (pdftotext, pdf-extract) fail on scanned or
//! image-heavy documents — there is no text layer to extract, and complex
//! layouts come out garbled. Instead this crate rasterises each page into a
//! PNG and lets a VLM read it as a human would, producing one Markdown
//! [`Document`] per page with page-number and source-file metadata attached,
//! ready for downstream ingestion pipelines.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Rasterise  every page to an image via pdfium (spawn_blocking)
//!  ├─ 2. Encode     PNG → base64 data URI
//!  ├─ 3. Extract    one sequential VLM call per page, temperature 0
//!  └─ 4. Collect    Vec<Document> in physical page order, fail-fast
//! ```
//!
//! Pages are processed strictly in order, one request in flight at a time.
//! The first page that fails aborts the whole extraction: the caller gets
//! either a complete document list or an error, never a partial result.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pagelens::{ExtractorConfig, PdfExtractor};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ExtractorConfig::builder()
//!         .api_key(std::env::var("OPENAI_API_KEY")?)
//!         .build()?;
//!     let extractor = PdfExtractor::new(config)?;
//!     for doc in extractor.extract_all("report.pdf").await? {
//!         println!("--- page {} of {}", doc.metadata.page_number, doc.metadata.source);
//!         println!("{}", doc.content);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Injecting a custom client
//!
//! The completion service sits behind the [`CompletionClient`] trait, and the
//! rasteriser behind [`Rasterizer`]. Both are caller-owned objects passed in
//! via [`PdfExtractor::with_client`] — there is no global client state. Tests
//! substitute scripted implementations; applications can wrap the production
//! [`OpenAiClient`] with their own middleware.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod client;
pub mod config;
pub mod document;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod prompts;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use client::{ClientError, CompletionClient, CompletionRequest, OpenAiClient};
pub use config::{ExtractorConfig, ExtractorConfigBuilder};
pub use document::{Document, DocumentMetadata};
pub use error::{ExtractError, PageFailure};
pub use extract::PdfExtractor;
pub use pipeline::render::{PdfiumRasterizer, Rasterizer};
