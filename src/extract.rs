//! The extraction orchestrator: rasterise once, then one sequential VLM
//! call per page.
//!
//! ## Why sequential?
//!
//! This crate targets ingestion pipelines that already parallelise across
//! documents; inside one document it keeps exactly one request in flight.
//! That keeps ordering trivial (document order is page order by
//! construction), makes the fail-fast contract exact (pages after the
//! first failure are never submitted), and avoids rate-limit pressure on
//! the completion service.

use crate::client::{CompletionClient, OpenAiClient};
use crate::config::ExtractorConfig;
use crate::document::Document;
use crate::error::ExtractError;
use crate::pipeline::page;
use crate::pipeline::render::{PdfiumRasterizer, Rasterizer};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Extracts per-page Markdown [`Document`]s from PDFs.
///
/// Holds the caller-owned completion client and rasteriser; no state is
/// kept across calls, so one extractor can serve any number of documents.
pub struct PdfExtractor {
    client: Arc<dyn CompletionClient>,
    rasterizer: Arc<dyn Rasterizer>,
    config: ExtractorConfig,
}

impl PdfExtractor {
    /// Build an extractor with the production pdfium rasteriser and an
    /// [`OpenAiClient`] constructed from `config.api_key` / `config.api_base`.
    pub fn new(config: ExtractorConfig) -> Result<Self, ExtractError> {
        if config.api_key.trim().is_empty() {
            return Err(ExtractError::InvalidConfig(
                "api_key is required and has no default".into(),
            ));
        }
        let client = Arc::new(OpenAiClient::with_api_base(
            config.api_key.clone(),
            config.api_base.clone(),
        ));
        let rasterizer = Arc::new(PdfiumRasterizer::new(config.max_rendered_pixels));
        Ok(Self::with_client(client, rasterizer, config))
    }

    /// Build an extractor around caller-supplied collaborators.
    ///
    /// This is the injection point for tests (scripted client, synthetic
    /// rasteriser) and for applications wrapping the client with their own
    /// middleware.
    pub fn with_client(
        client: Arc<dyn CompletionClient>,
        rasterizer: Arc<dyn Rasterizer>,
        config: ExtractorConfig,
    ) -> Self {
        Self {
            client,
            rasterizer,
            config,
        }
    }

    /// Extract every page of the PDF at `pdf_path`, in physical order.
    ///
    /// Returns one [`Document`] per page with `page_number` running 1..=N,
    /// or the first error encountered. On a page failure no later page is
    /// submitted to the completion service and no partial list is returned.
    pub async fn extract_all(&self, pdf_path: impl AsRef<Path>) -> Result<Vec<Document>, ExtractError> {
        let pdf_path = pdf_path.as_ref();
        validate_pdf_path(pdf_path)?;
        let source = base_name(pdf_path);
        info!("Starting extraction: {}", source);

        let images = self.rasterizer.rasterize(pdf_path).await?;
        info!("Rasterised {} pages", images.len());

        let mut documents = Vec::with_capacity(images.len());
        for (idx, image) in images.iter().enumerate() {
            let doc = page::process_page(
                self.client.as_ref(),
                &self.config,
                image,
                idx + 1,
                &source,
            )
            .await?;
            documents.push(doc);
        }

        info!("Extraction complete: {} documents from {}", documents.len(), source);
        Ok(documents)
    }

    /// Extract from in-memory PDF bytes.
    ///
    /// The bytes are written to a managed temp file (pdfium needs a path)
    /// which is removed when this call returns, on success and on error.
    /// `source_name` is recorded as `metadata.source` since the temp path
    /// is meaningless to the caller.
    pub async fn extract_from_bytes(
        &self,
        bytes: &[u8],
        source_name: impl Into<String>,
    ) -> Result<Vec<Document>, ExtractError> {
        let source = source_name.into();
        let mut tmp = tempfile::NamedTempFile::new()
            .map_err(|e| ExtractError::Internal(format!("tempfile: {e}")))?;
        tmp.write_all(bytes)
            .map_err(|e| ExtractError::Internal(format!("tempfile write: {e}")))?;

        validate_pdf_path(tmp.path())?;
        let images = self.rasterizer.rasterize(tmp.path()).await?;
        // pdfium is done with the file once pages are rendered
        drop(tmp);

        let mut documents = Vec::with_capacity(images.len());
        for (idx, image) in images.iter().enumerate() {
            let doc = page::process_page(
                self.client.as_ref(),
                &self.config,
                image,
                idx + 1,
                &source,
            )
            .await?;
            documents.push(doc);
        }

        Ok(documents)
    }

    /// Number of pages in the PDF, with no rendering and no network call.
    pub async fn page_count(&self, pdf_path: impl AsRef<Path>) -> Result<usize, ExtractError> {
        let pdf_path = pdf_path.as_ref();
        validate_pdf_path(pdf_path)?;
        self.rasterizer.page_count(pdf_path).await
    }
}

/// Base file name of the input, path stripped.
fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Validate existence, readability, and the `%PDF` magic bytes before
/// handing the file to pdfium, so callers get a meaningful error instead
/// of an opaque pdfium failure.
fn validate_pdf_path(path: &Path) -> Result<(), ExtractError> {
    if !path.exists() {
        return Err(ExtractError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    match std::fs::File::open(path) {
        Ok(mut f) => {
            use std::io::Read;
            let mut magic = [0u8; 4];
            if f.read_exact(&mut magic).is_ok() && &magic != b"%PDF" {
                return Err(ExtractError::NotAPdf {
                    path: path.to_path_buf(),
                    magic,
                });
            }
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            Err(ExtractError::PermissionDenied {
                path: path.to_path_buf(),
            })
        }
        Err(_) => Err(ExtractError::FileNotFound {
            path: path.to_path_buf(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_name_strips_directories() {
        assert_eq!(base_name(Path::new("/data/reports/q1.pdf")), "q1.pdf");
        assert_eq!(base_name(Path::new("q1.pdf")), "q1.pdf");
    }

    #[test]
    fn validate_rejects_missing_file() {
        let err = validate_pdf_path(Path::new("/nonexistent/never.pdf")).unwrap_err();
        assert!(matches!(err, ExtractError::FileNotFound { .. }));
    }

    #[test]
    fn validate_rejects_wrong_magic() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"PK\x03\x04 not a pdf").unwrap();
        let err = validate_pdf_path(tmp.path()).unwrap_err();
        assert!(matches!(err, ExtractError::NotAPdf { .. }));
    }

    #[test]
    fn validate_accepts_pdf_magic() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"%PDF-1.7\n").unwrap();
        assert!(validate_pdf_path(tmp.path()).is_ok());
    }
}
