//! View projections
//!
//! Pure projections of session state for whatever surface renders it. No
//! markup is produced here; the UI layer turns these into DOM nodes,
//! terminal output or JSON unchanged.

use serde::Serialize;

use super::ReaderSession;

/// Character range of the highlighted sentence within the page text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightRange {
    pub start: usize,
    pub end: usize,
}

/// The main text panel: current page plus playback decoration
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    pub page_number: usize,
    pub total_pages: usize,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<HighlightRange>,
    /// Percentage of the current page text consumed
    pub progress_percent: f32,
    pub editable: bool,
}

/// One entry in the sidebar page list
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageListItem {
    pub page_number: usize,
    /// Uppercase source indicator (PDF, WORD, TXT)
    pub kind: &'static str,
    pub preview: String,
    pub active: bool,
}

/// Project the current page, or `None` when no document is loaded
pub fn page_view(session: &ReaderSession) -> Option<PageView> {
    let document = session.document()?;
    let page = document.page(session.current_page())?;
    let playback = session.playback();

    Some(PageView {
        page_number: page.number,
        total_pages: document.page_count(),
        text: page.text.clone(),
        highlight: playback.highlighted_span().map(|span| HighlightRange {
            start: span.start,
            end: span.end,
        }),
        progress_percent: playback.progress() * 100.0,
        editable: session.is_editing(),
    })
}

/// Project the sidebar page list with the active-page indicator
pub fn page_list(session: &ReaderSession) -> Vec<PageListItem> {
    let Some(document) = session.document() else {
        return Vec::new();
    };
    document
        .pages
        .iter()
        .map(|page| PageListItem {
            page_number: page.number,
            kind: page.kind.label(),
            preview: page.preview_text(),
            active: page.number == session.current_page(),
        })
        .collect()
}

/// Status-bar label
pub fn page_info(session: &ReaderSession) -> String {
    if session.page_count() == 0 {
        "No document".to_string()
    } else {
        format!("Page {} of {}", session.current_page(), session.page_count())
    }
}
