//! Document error types
//!
//! Unified error handling for all document sources (PDF, Word, plain text).
//! Every failure during file read or parse collapses into this single
//! taxonomy; callers surface it as one generic load failure and retain no
//! partial state.

use thiserror::Error;

/// Unified document error type
#[derive(Debug, Error)]
pub enum DocumentError {
    /// File extension is not one of the supported sources
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Failed to parse document bytes
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid content (encoding, container structure)
    #[error("Invalid content: {0}")]
    InvalidContent(String),

    /// Page number outside [1, page_count]
    #[error("Page {number} not found (document has {page_count} pages)")]
    PageOutOfRange { number: usize, page_count: usize },

    /// IO error (std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for document operations
pub type DocumentResult<T> = std::result::Result<T, DocumentError>;

impl From<lopdf::Error> for DocumentError {
    fn from(err: lopdf::Error) -> Self {
        DocumentError::Parse(err.to_string())
    }
}

impl From<zip::result::ZipError> for DocumentError {
    fn from(err: zip::result::ZipError) -> Self {
        DocumentError::InvalidContent(err.to_string())
    }
}

impl From<quick_xml::Error> for DocumentError {
    fn from(err: quick_xml::Error) -> Self {
        DocumentError::Parse(err.to_string())
    }
}
