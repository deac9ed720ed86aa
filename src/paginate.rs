//! Pagination strategies
//!
//! Pure, deterministic strategies that chunk extracted text into `Page`
//! entities. Word-derived text is grouped by paragraph count; plain text is
//! cut into fixed-size character windows. Both are total: empty input yields
//! zero pages, input shorter than one window yields exactly one page, and
//! the produced pages partition the source text without loss.

use crate::document::{Page, SourceKind};

/// Paragraphs grouped into one Word-derived page
pub const DEFAULT_PARAGRAPHS_PER_PAGE: usize = 12;

/// Characters per plain-text page window
pub const DEFAULT_CHARS_PER_PAGE: usize = 1500;

/// Characters kept in a page preview
pub const DEFAULT_PREVIEW_LEN: usize = 100;

/// Split text on blank-line boundaries into paragraphs.
///
/// A run of one or more blank lines separates paragraphs; runs collapse into
/// a single boundary and produce no empty paragraphs.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current = String::new();

    for line in text.lines() {
        if line.is_empty() {
            if !current.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
        } else {
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }
    paragraphs
}

/// Group paragraphs into pages of `per_page` paragraphs each.
///
/// Page text re-joins its paragraphs with blank lines; the preview is the
/// first two paragraphs joined with a space, truncated to `preview_len`
/// characters.
pub fn by_paragraphs(
    paragraphs: &[String],
    per_page: usize,
    preview_len: usize,
    kind: SourceKind,
) -> Vec<Page> {
    let per_page = per_page.max(1);
    paragraphs
        .chunks(per_page)
        .enumerate()
        .map(|(i, chunk)| {
            let preview = truncate_chars(&chunk[..chunk.len().min(2)].join(" "), preview_len);
            Page {
                number: i + 1,
                text: chunk.join("\n\n"),
                preview: Some(preview),
                kind,
            }
        })
        .collect()
}

/// Cut text into fixed windows of `chars_per_page` characters.
///
/// Windows are measured in characters, never splitting a UTF-8 scalar; the
/// preview is the first `preview_len` characters of the window.
pub fn by_windows(
    text: &str,
    chars_per_page: usize,
    preview_len: usize,
    kind: SourceKind,
) -> Vec<Page> {
    let chars_per_page = chars_per_page.max(1);
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(chars_per_page)
        .enumerate()
        .map(|(i, window)| {
            let text: String = window.iter().collect();
            let preview = truncate_chars(&text, preview_len);
            Page {
                number: i + 1,
                text,
                preview: Some(preview),
                kind,
            }
        })
        .collect()
}

/// Truncate a string to at most `n` characters on a char boundary
pub fn truncate_chars(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}
