//! Image encoding: `DynamicImage` → base64 PNG data URI.
//!
//! VLM APIs accept images as base64 data URIs embedded in the JSON request
//! body. PNG is chosen over JPEG because it is lossless — text crispness
//! matters far more than file size for transcription accuracy.
//!
//! The in-memory buffer is scoped to this function: it is allocated, the
//! PNG is written into it, the bytes are read out for base64, and it is
//! dropped on every exit path including the error path.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::DynamicImage;
use std::io::Cursor;
use tracing::debug;

/// Encode a rasterised page as a PNG data URI ready for the request body.
pub fn encode_page(img: &DynamicImage) -> Result<String, image::ImageError> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)?;

    let b64 = STANDARD.encode(&buf);
    debug!("Encoded page image → {} bytes base64", b64.len());

    Ok(format!("data:image/png;base64,{}", b64))
}
