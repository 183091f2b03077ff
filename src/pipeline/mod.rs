//! Pipeline stages for per-page PDF extraction.
//!
//! Each submodule implements exactly one transformation step. Keeping
//! stages separate makes each independently testable and lets us swap
//! implementations (e.g. a different rendering backend) without touching
//! the others.
//!
//! ## Data Flow
//!
//! ```text
//! render ──▶ encode ──▶ page
//! (pdfium)   (base64)   (VLM call + Document assembly)
//! ```
//!
//! 1. [`render`] — rasterise all pages in order; runs in `spawn_blocking`
//!    because pdfium is not async-safe
//! 2. [`encode`] — PNG-encode and base64-wrap each `DynamicImage` for the
//!    multimodal request body
//! 3. [`page`]  — build the request, call the completion client, and wrap
//!    the result (or failure) into a document record; the only stage with
//!    network I/O

pub mod encode;
pub mod page;
pub mod render;
