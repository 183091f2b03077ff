//! Integration tests for the extraction orchestrator.
//!
//! The completion service and the rasteriser are both injected fakes, so
//! these tests exercise the real orchestration, page-processing, and
//! error-propagation paths without pdfium or network access.

use async_trait::async_trait;
use image::{DynamicImage, Rgba, RgbaImage};
use pagelens::{
    ClientError, CompletionClient, CompletionRequest, Document, ExtractError, ExtractorConfig,
    PdfExtractor, Rasterizer,
};
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::NamedTempFile;

// ── Fakes ────────────────────────────────────────────────────────────────

/// Returns a fixed number of synthetic page images for any path.
struct FakeRasterizer {
    pages: usize,
}

#[async_trait]
impl Rasterizer for FakeRasterizer {
    async fn rasterize(&self, _pdf_path: &Path) -> Result<Vec<DynamicImage>, ExtractError> {
        Ok((0..self.pages)
            .map(|_| DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([255; 4]))))
            .collect())
    }

    async fn page_count(&self, _pdf_path: &Path) -> Result<usize, ExtractError> {
        Ok(self.pages)
    }
}

/// Replays a scripted response sequence, one entry per call, repeating the
/// script on subsequent invocations. Counts every call it receives.
struct ScriptedClient {
    script: Vec<Result<String, String>>,
    calls: AtomicUsize,
}

impl ScriptedClient {
    fn new(script: Vec<Result<String, String>>) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
        }
    }

    /// Every call answers with the same text.
    fn constant(text: &str) -> Self {
        Self::new(vec![Ok(text.to_string())])
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    async fn complete(&self, _request: &CompletionRequest) -> Result<String, ClientError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.script[n % self.script.len()] {
            Ok(text) => Ok(text.clone()),
            Err(msg) => Err(ClientError::Api {
                status: 500,
                body: msg.clone(),
            }),
        }
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────

/// A minimal on-disk file passing the `%PDF` magic-byte check. The fake
/// rasteriser never parses it.
fn stub_pdf() -> NamedTempFile {
    let mut tmp = NamedTempFile::with_suffix(".pdf").expect("create temp file");
    tmp.write_all(b"%PDF-1.7\n%stub\n").expect("write stub");
    tmp
}

fn extractor(pages: usize, client: Arc<ScriptedClient>) -> PdfExtractor {
    // Surface pipeline tracing in test output when RUST_LOG is set.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let config = ExtractorConfig::builder().api_key("sk-test").build().unwrap();
    PdfExtractor::with_client(client, Arc::new(FakeRasterizer { pages }), config)
}

// ── Tests ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn n_pages_yield_n_documents_in_order() {
    let client = Arc::new(ScriptedClient::new(
        (1..=5).map(|n| Ok(format!("content of page {n}"))).collect(),
    ));
    let pdf = stub_pdf();
    let source = pdf.path().file_name().unwrap().to_string_lossy().into_owned();

    let docs = extractor(5, Arc::clone(&client))
        .extract_all(pdf.path())
        .await
        .expect("extraction should succeed");

    assert_eq!(docs.len(), 5);
    for (i, doc) in docs.iter().enumerate() {
        assert_eq!(doc.metadata.page_number, i + 1);
        assert_eq!(doc.metadata.source, source);
        assert_eq!(doc.content, format!("content of page {}", i + 1));
    }
    assert_eq!(client.call_count(), 5);
}

#[tokio::test]
async fn repeated_invocations_are_identical() {
    let client = Arc::new(ScriptedClient::new(
        (1..=3).map(|n| Ok(format!("# Section {n}"))).collect(),
    ));
    let pdf = stub_pdf();
    let ex = extractor(3, client);

    let first: Vec<Document> = ex.extract_all(pdf.path()).await.unwrap();
    let second: Vec<Document> = ex.extract_all(pdf.path()).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn failure_at_page_k_stops_the_batch() {
    // Page 3 of 5 fails; pages 4 and 5 must never be submitted.
    let client = Arc::new(ScriptedClient::new(vec![
        Ok("one".into()),
        Ok("two".into()),
        Err("backend exploded".into()),
        Ok("four".into()),
        Ok("five".into()),
    ]));
    let pdf = stub_pdf();

    let err = extractor(5, Arc::clone(&client))
        .extract_all(pdf.path())
        .await
        .expect_err("extraction must fail");

    assert_eq!(client.call_count(), 3);
    match err {
        ExtractError::Page(failure) => {
            assert_eq!(failure.page, 3);
            assert!(failure.cause.contains("backend exploded"));
            assert!(failure.source.ends_with(".pdf"));
        }
        other => panic!("expected page failure, got: {other}"),
    }
}

#[tokio::test]
async fn content_is_whitespace_trimmed() {
    let client = Arc::new(ScriptedClient::constant("  # Title\n\n"));
    let pdf = stub_pdf();

    let docs = extractor(1, client).extract_all(pdf.path()).await.unwrap();
    assert_eq!(docs[0].content, "# Title");
}

#[tokio::test]
async fn source_is_stripped_to_the_base_file_name() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("data").join("reports");
    std::fs::create_dir_all(&nested).unwrap();
    let pdf_path = nested.join("q1.pdf");
    std::fs::write(&pdf_path, b"%PDF-1.7\n%stub\n").unwrap();

    let client = Arc::new(ScriptedClient::constant("text"));
    let docs = extractor(2, client).extract_all(&pdf_path).await.unwrap();

    assert_eq!(docs.len(), 2);
    assert!(docs.iter().all(|d| d.metadata.source == "q1.pdf"));
}

#[tokio::test]
async fn bytes_extraction_records_caller_supplied_source() {
    // extract_from_bytes has no meaningful path, so the caller's name is
    // recorded verbatim.
    let client = Arc::new(ScriptedClient::constant("text"));
    let ex = extractor(2, client);

    let docs = ex
        .extract_from_bytes(b"%PDF-1.7\n%stub\n", "q1.pdf")
        .await
        .unwrap();

    assert!(docs.iter().all(|d| d.metadata.source == "q1.pdf"));
}

#[tokio::test]
async fn single_page_pdf_yields_one_document() {
    let client = Arc::new(ScriptedClient::constant("only page"));
    let pdf = stub_pdf();

    let docs = extractor(1, client).extract_all(pdf.path()).await.unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].metadata.page_number, 1);
}

#[tokio::test]
async fn missing_file_fails_before_any_client_call() {
    let client = Arc::new(ScriptedClient::constant("never used"));
    let err = extractor(3, Arc::clone(&client))
        .extract_all("/no/such/file.pdf")
        .await
        .expect_err("must fail");

    assert!(matches!(err, ExtractError::FileNotFound { .. }));
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn non_pdf_file_is_rejected() {
    let mut tmp = NamedTempFile::new().unwrap();
    tmp.write_all(b"<html>not a pdf</html>").unwrap();

    let client = Arc::new(ScriptedClient::constant("never used"));
    let err = extractor(1, Arc::clone(&client))
        .extract_all(tmp.path())
        .await
        .expect_err("must fail");

    assert!(matches!(err, ExtractError::NotAPdf { .. }));
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn page_count_makes_no_client_calls() {
    let client = Arc::new(ScriptedClient::constant("never used"));
    let pdf = stub_pdf();

    let count = extractor(7, Arc::clone(&client))
        .page_count(pdf.path())
        .await
        .unwrap();

    assert_eq!(count, 7);
    assert_eq!(client.call_count(), 0);
}
