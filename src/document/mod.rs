//! Paginated document model
//!
//! Source-agnostic document handling: a `Document` owns an ordered sequence
//! of `Page` entities built at load time by one of three source-specific
//! strategies (PDF, Word, plain text), then navigated and edited in place by
//! the reading session.
//!
//! ```rust,ignore
//! use leitura::config::PagingConfig;
//! use leitura::document;
//!
//! let doc = document::load_path("book.pdf", PagingConfig::default()).await?;
//! let first = doc.page(1).map(|p| p.text.as_str());
//! ```

mod error;
mod loader;
mod types;

pub use error::{DocumentError, DocumentResult};
pub use loader::{load_bytes, load_path};
pub use types::{Document, Page, SourceKind, PREVIEW_FALLBACK_LEN};
