//! Core document types
//!
//! Source-agnostic types for the paginated document model. A `Document` is
//! an ordered sequence of `Page` entities created at load time; page text is
//! mutated in place when the user edits and saves, and the whole document is
//! replaced wholesale on a new file load.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of the generated preview when a page stores none of its own
pub const PREVIEW_FALLBACK_LEN: usize = 100;

/// Document source kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKind {
    #[serde(rename = "pdf")]
    Pdf,
    #[serde(rename = "word")]
    Word,
    #[serde(rename = "txt")]
    PlainText,
}

impl SourceKind {
    /// Detect source kind from file extension (case-insensitive)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Word),
            "txt" => Some(Self::PlainText),
            _ => None,
        }
    }

    /// Detect source kind from a file name
    pub fn from_file_name(name: &str) -> Option<Self> {
        name.rsplit('.').next().and_then(Self::from_extension)
    }

    /// Short uppercase indicator for page-list display
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Word => "WORD",
            Self::PlainText => "TXT",
        }
    }
}

/// One contiguous chunk of document text with a 1-based index
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// 1-based page number
    pub number: usize,
    /// Full text content; editable by the user
    pub text: String,
    /// Short preview for the page list; generated at load time for
    /// Word and plain-text pages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    /// Source the page was built from
    pub kind: SourceKind,
}

impl Page {
    /// Stored preview, falling back to a prefix of the page text
    pub fn preview_text(&self) -> String {
        match &self.preview {
            Some(p) => p.clone(),
            None => self.text.chars().take(PREVIEW_FALLBACK_LEN).collect(),
        }
    }
}

/// A loaded document: ordered pages plus source identity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Unique id minted at load time
    pub id: Uuid,
    /// Source the document was built from
    pub kind: SourceKind,
    /// Pages, numbered 1..=page_count contiguously
    pub pages: Vec<Page>,
}

impl Document {
    /// Build a document from pages produced by a pagination strategy
    pub fn new(kind: SourceKind, pages: Vec<Page>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            pages,
        }
    }

    /// Total page count
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Page by 1-based number, `None` when out of range
    pub fn page(&self, number: usize) -> Option<&Page> {
        if number == 0 {
            return None;
        }
        self.pages.get(number - 1)
    }

    /// Mutable page by 1-based number
    pub fn page_mut(&mut self, number: usize) -> Option<&mut Page> {
        if number == 0 {
            return None;
        }
        self.pages.get_mut(number - 1)
    }

    /// Commit edited text into a page, in place
    pub fn set_page_text(
        &mut self,
        number: usize,
        text: String,
    ) -> Result<(), super::DocumentError> {
        let page_count = self.page_count();
        match self.page_mut(number) {
            Some(page) => {
                page.text = text;
                Ok(())
            }
            None => Err(super::DocumentError::PageOutOfRange { number, page_count }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(number: usize, text: &str) -> Page {
        Page {
            number,
            text: text.to_string(),
            preview: None,
            kind: SourceKind::PlainText,
        }
    }

    #[test]
    fn kind_from_extension_is_case_insensitive() {
        assert_eq!(SourceKind::from_extension("PDF"), Some(SourceKind::Pdf));
        assert_eq!(SourceKind::from_extension("Docx"), Some(SourceKind::Word));
        assert_eq!(SourceKind::from_extension("txt"), Some(SourceKind::PlainText));
        assert_eq!(SourceKind::from_extension("epub"), None);
    }

    #[test]
    fn kind_from_file_name_uses_last_extension() {
        assert_eq!(
            SourceKind::from_file_name("report.final.DOCX"),
            Some(SourceKind::Word)
        );
        assert_eq!(SourceKind::from_file_name("notes"), None);
    }

    #[test]
    fn page_lookup_is_one_based() {
        let doc = Document::new(SourceKind::PlainText, vec![page(1, "a"), page(2, "b")]);
        assert_eq!(doc.page_count(), 2);
        assert!(doc.page(0).is_none());
        assert_eq!(doc.page(1).map(|p| p.text.as_str()), Some("a"));
        assert_eq!(doc.page(2).map(|p| p.text.as_str()), Some("b"));
        assert!(doc.page(3).is_none());
    }

    #[test]
    fn set_page_text_commits_in_place() {
        let mut doc = Document::new(SourceKind::PlainText, vec![page(1, "original")]);
        doc.set_page_text(1, "edited".to_string()).unwrap();
        assert_eq!(doc.page(1).map(|p| p.text.as_str()), Some("edited"));
        assert!(doc.set_page_text(2, "nope".to_string()).is_err());
    }

    #[test]
    fn preview_falls_back_to_text_prefix() {
        let long = "x".repeat(300);
        let p = page(1, &long);
        assert_eq!(p.preview_text().chars().count(), PREVIEW_FALLBACK_LEN);
    }
}
