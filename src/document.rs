//! Output record types: one [`Document`] per successfully extracted page.
//!
//! Documents are plain data. They are created fresh on every extraction,
//! returned to the caller in physical page order, and never referenced by
//! the library afterwards — persistence, chunking, and indexing are the
//! caller's business.

use serde::{Deserialize, Serialize};

/// The extracted Markdown for one PDF page, plus provenance metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Extracted Markdown, leading/trailing whitespace trimmed.
    /// May be empty when the model finds nothing on the page.
    pub content: String,
    /// Page and source provenance.
    pub metadata: DocumentMetadata,
}

/// Provenance for a [`Document`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// 1-based page number, assigned in rasterisation order. Contiguous
    /// across the returned list: the k-th document has page_number == k.
    pub page_number: usize,
    /// Base file name of the input PDF (path stripped), e.g. "q1.pdf".
    pub source: String,
}

impl Document {
    /// Build a document for one page, trimming the model output.
    pub fn new(content: impl AsRef<str>, page_number: usize, source: impl Into<String>) -> Self {
        Self {
            content: content.as_ref().trim().to_string(),
            metadata: DocumentMetadata {
                page_number,
                source: source.into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_whitespace() {
        let doc = Document::new("  # Title\n\n", 1, "q1.pdf");
        assert_eq!(doc.content, "# Title");
    }

    #[test]
    fn empty_content_is_allowed() {
        let doc = Document::new("   \n ", 2, "blank.pdf");
        assert_eq!(doc.content, "");
        assert_eq!(doc.metadata.page_number, 2);
    }

    #[test]
    fn serde_round_trip() {
        let doc = Document::new("# Heading", 4, "doc.pdf");
        let json = serde_json::to_string(&doc).unwrap();
        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }
}
