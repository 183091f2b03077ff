//! Prompts for VLM-based page-to-Markdown extraction.
//!
//! Centralising every prompt here serves two purposes:
//!
//! 1. **Single source of truth** — changing the extraction behaviour (e.g.
//!    how embedded images are described) requires editing exactly one place.
//!
//! 2. **Testability** — unit tests can inspect prompts directly without
//!    spinning up a real VLM, making prompt regressions easy to catch.
//!
//! Callers can override the system prompt via
//! [`crate::config::ExtractorConfig::system_prompt`]; the constants here are
//! used when no override is provided.

/// System message sent with every page request.
///
/// Kept deliberately short: the detailed conversion rules live in
/// [`PAGE_DIRECTIVE`], which travels in the user turn next to the image.
pub const SYSTEM_PROMPT: &str = "You respond in Markdown.";

/// Fixed directive sent as the user-turn text alongside each page image.
pub const PAGE_DIRECTIVE: &str = r#"Convert this PDF page image to Markdown.

Follow these rules precisely:

1. Return ONLY the Markdown content of the page — no explanations,
   no commentary, and do NOT wrap the output in ``` fences.
2. Preserve ALL text content completely, in natural reading order.
3. Replace any embedded image, chart, or figure with a short bracketed
   description of what it shows, e.g. [Bar chart of quarterly revenue].
4. Use Markdown heading levels (#, ##, ###) that match the visual
   hierarchy of the original page.
5. Use **bold** and *italic* to match the visual emphasis on the page."#;
