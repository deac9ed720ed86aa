//! Plain-text windowing
//!
//! Plain-text files carry no structure of their own, so they are cut into
//! fixed-size character windows. Bytes are decoded as UTF-8, degrading
//! lossily instead of failing on malformed sequences.

use tracing::debug;

use crate::config::PagingConfig;
use crate::document::{DocumentResult, Page, SourceKind};
use crate::paginate;

/// Parse plain-text bytes into fixed character windows
pub fn parse(bytes: &[u8], paging: PagingConfig) -> DocumentResult<Vec<Page>> {
    let text = String::from_utf8_lossy(bytes);
    debug!(chars = text.chars().count(), "paginating plain text");
    Ok(paginate::by_windows(
        &text,
        paging.chars_per_page,
        paging.preview_len,
        SourceKind::PlainText,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_use_the_configured_size() {
        let bytes = "x".repeat(4500).into_bytes();
        let pages = parse(&bytes, PagingConfig::default()).unwrap();
        assert_eq!(pages.len(), 3);
        assert!(pages.iter().all(|p| p.kind == SourceKind::PlainText));
    }

    #[test]
    fn invalid_utf8_degrades_instead_of_failing() {
        let mut bytes = b"before ".to_vec();
        bytes.push(0xFF);
        bytes.extend_from_slice(b" after");
        let pages = parse(&bytes, PagingConfig::default()).unwrap();
        assert_eq!(pages.len(), 1);
        assert!(pages[0].text.starts_with("before "));
        assert!(pages[0].text.ends_with(" after"));
    }

    #[test]
    fn empty_file_is_zero_pages() {
        let pages = parse(b"", PagingConfig::default()).unwrap();
        assert!(pages.is_empty());
    }
}
