//! Error types for the pagelens library.
//!
//! Two types reflect the two failure boundaries in the pipeline:
//!
//! * [`ExtractError`] — returned by the top-level `extract_*` functions.
//!   Covers everything that stops an extraction: unreadable input, a corrupt
//!   PDF, rasterisation problems, and the first page whose completion call
//!   failed (wrapped as [`ExtractError::Page`]).
//!
//! * [`PageFailure`] — produced at the page-processor boundary. It carries
//!   the page number, the source file name, and the underlying cause, so the
//!   caller knows exactly where an extraction stopped without parsing log
//!   output.
//!
//! There is no partial-success mode: the first `PageFailure` aborts the
//! batch and surfaces through `ExtractError::Page`.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the top-level extraction functions.
#[derive(Debug, Error)]
pub enum ExtractError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    // ── PDF errors ────────────────────────────────────────────────────────
    /// PDF header/trailer/xref is corrupt and cannot be parsed by pdfium.
    #[error("PDF '{path}' is corrupt: {detail}")]
    CorruptPdf { path: PathBuf, detail: String },

    /// pdfium returned an error while rendering a specific page.
    #[error("Rasterisation failed for page {page}: {detail}")]
    RasterisationFailed { page: usize, detail: String },

    // ── Page errors ───────────────────────────────────────────────────────
    /// A page's extraction failed; no further pages were processed.
    #[error(transparent)]
    Page(#[from] PageFailure),

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A single page's extraction failed.
///
/// Produced by [`crate::pipeline::page::process_page`] when image encoding
/// or the completion call errors. The orchestrator stops at the first one;
/// pages after `page` are never submitted to the completion service.
#[derive(Debug, Clone)]
pub struct PageFailure {
    /// 1-based page number in physical order.
    pub page: usize,
    /// Base file name of the input PDF.
    pub source: String,
    /// Description of the underlying encoding or API error.
    pub cause: String,
}

impl std::fmt::Display for PageFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Page {} of '{}': extraction failed: {}",
            self.page, self.source, self.cause
        )
    }
}

impl std::error::Error for PageFailure {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_failure_display() {
        let e = PageFailure {
            page: 3,
            source: "q1.pdf".into(),
            cause: "connection reset".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("Page 3"), "got: {msg}");
        assert!(msg.contains("q1.pdf"), "got: {msg}");
        assert!(msg.contains("connection reset"), "got: {msg}");
    }

    #[test]
    fn page_failure_converts_to_extract_error() {
        let failure = PageFailure {
            page: 1,
            source: "doc.pdf".into(),
            cause: "boom".into(),
        };
        let e: ExtractError = failure.into();
        assert!(matches!(e, ExtractError::Page(_)));
        assert!(e.to_string().contains("doc.pdf"));
    }

    #[test]
    fn not_a_pdf_display_shows_magic() {
        let e = ExtractError::NotAPdf {
            path: PathBuf::from("/tmp/x.pdf"),
            magic: *b"PK\x03\x04",
        };
        assert!(e.to_string().contains("not a valid PDF"));
    }
}
