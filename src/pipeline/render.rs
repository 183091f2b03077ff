//! PDF rasterisation: render every page to a `DynamicImage` via pdfium.
//!
//! ## Why a trait?
//!
//! Rasterisation is an external collaborator, not part of this crate's
//! logic. Putting it behind [`Rasterizer`] lets tests drive the pipeline
//! with synthetic images and keeps the pdfium dependency at the edge.
//!
//! ## Why spawn_blocking?
//!
//! The `pdfium-render` crate wraps the pdfium C++ library, which uses
//! thread-local state internally and is not safe to call from async
//! contexts. `tokio::task::spawn_blocking` moves the work onto a dedicated
//! thread-pool thread so Tokio workers don't stall during CPU-heavy
//! rendering.

use crate::error::ExtractError;
use async_trait::async_trait;
use image::DynamicImage;
use pdfium_render::prelude::*;
use std::path::Path;
use tracing::{debug, info};

/// Produces the ordered sequence of page images for a PDF.
#[async_trait]
pub trait Rasterizer: Send + Sync {
    /// Render every page of the PDF at `pdf_path`, in physical order.
    async fn rasterize(&self, pdf_path: &Path) -> Result<Vec<DynamicImage>, ExtractError>;

    /// Number of pages in the PDF, without rendering anything.
    async fn page_count(&self, pdf_path: &Path) -> Result<usize, ExtractError>;
}

/// Production [`Rasterizer`] backed by pdfium.
pub struct PdfiumRasterizer {
    /// Cap on the longest rendered edge, in pixels.
    max_pixels: u32,
}

impl PdfiumRasterizer {
    pub fn new(max_pixels: u32) -> Self {
        Self { max_pixels }
    }
}

#[async_trait]
impl Rasterizer for PdfiumRasterizer {
    async fn rasterize(&self, pdf_path: &Path) -> Result<Vec<DynamicImage>, ExtractError> {
        let path = pdf_path.to_path_buf();
        let max_pixels = self.max_pixels;

        tokio::task::spawn_blocking(move || rasterize_blocking(&path, max_pixels))
            .await
            .map_err(|e| ExtractError::Internal(format!("Render task panicked: {}", e)))?
    }

    async fn page_count(&self, pdf_path: &Path) -> Result<usize, ExtractError> {
        let path = pdf_path.to_path_buf();

        tokio::task::spawn_blocking(move || {
            let pdfium = Pdfium::default();
            let document = load_document(&pdfium, &path)?;
            Ok(document.pages().len() as usize)
        })
        .await
        .map_err(|e| ExtractError::Internal(format!("Page-count task panicked: {}", e)))?
    }
}

fn load_document<'a>(pdfium: &'a Pdfium, path: &Path) -> Result<PdfDocument<'a>, ExtractError> {
    pdfium
        .load_pdf_from_file(path, None)
        .map_err(|e| ExtractError::CorruptPdf {
            path: path.to_path_buf(),
            detail: format!("{:?}", e),
        })
}

/// Blocking implementation of full-document rendering.
fn rasterize_blocking(pdf_path: &Path, max_pixels: u32) -> Result<Vec<DynamicImage>, ExtractError> {
    let pdfium = Pdfium::default();
    let document = load_document(&pdfium, pdf_path)?;

    let pages = document.pages();
    let total_pages = pages.len() as usize;
    info!("PDF loaded: {} pages", total_pages);

    let render_config = PdfRenderConfig::new()
        .set_target_width(max_pixels as i32)
        .set_maximum_height(max_pixels as i32);

    let mut images = Vec::with_capacity(total_pages);

    for (idx, page) in pages.iter().enumerate() {
        let bitmap = page
            .render_with_config(&render_config)
            .map_err(|e| ExtractError::RasterisationFailed {
                page: idx + 1,
                detail: format!("{:?}", e),
            })?;

        let image = bitmap.as_image();
        debug!(
            "Rendered page {} → {}x{} px",
            idx + 1,
            image.width(),
            image.height()
        );

        images.push(image);
    }

    Ok(images)
}
