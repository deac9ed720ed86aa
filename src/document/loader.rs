//! Document loading
//!
//! Entry points that classify an input file by extension, hand its bytes to
//! the matching format parser, and assemble the resulting pages into a
//! `Document`. Parsing is CPU-bound, so it is offloaded with
//! `tokio::task::spawn_blocking`.

use std::path::Path;

use tracing::info;

use super::{Document, DocumentError, DocumentResult, SourceKind};
use crate::config::PagingConfig;
use crate::formats;

/// Load a document from the filesystem
pub async fn load_path<P: AsRef<Path>>(path: P, paging: PagingConfig) -> DocumentResult<Document> {
    let path = path.as_ref();
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| DocumentError::UnsupportedFormat(path.display().to_string()))?
        .to_string();
    let bytes = tokio::fs::read(path).await?;
    load_bytes(&file_name, bytes, paging).await
}

/// Load a document from raw bytes plus the file name it arrived under
pub async fn load_bytes(
    file_name: &str,
    bytes: Vec<u8>,
    paging: PagingConfig,
) -> DocumentResult<Document> {
    let kind = SourceKind::from_file_name(file_name)
        .ok_or_else(|| DocumentError::UnsupportedFormat(file_name.to_string()))?;

    let pages = tokio::task::spawn_blocking(move || match kind {
        SourceKind::Pdf => formats::pdf::parse(&bytes),
        SourceKind::Word => formats::word::parse(&bytes, paging),
        SourceKind::PlainText => formats::text::parse(&bytes, paging),
    })
    .await
    .map_err(|e| DocumentError::Parse(format!("parser task failed: {e}")))??;

    let document = Document::new(kind, pages);
    info!(
        kind = kind.label(),
        pages = document.page_count(),
        id = %document.id,
        "document loaded"
    );
    Ok(document)
}
