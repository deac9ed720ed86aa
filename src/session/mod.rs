//! Reading session
//!
//! `ReaderSession` is the explicit session object holding everything the
//! reader tracks for one open document: the document itself, the current
//! page, playback state and the in-flight speech handle, and the edit-mode
//! draft. All state transitions funnel through it; rendering is a
//! projection of this state (see `view`).
//!
//! The session enforces the mutual exclusions the original relies on: one
//! playback session at a time, edit mode never coexists with playback, and
//! page changes reset playback.

mod playback;
mod sentence;
mod view;

pub use playback::{PlaybackController, PlaybackEffect, PlaybackState};
pub use sentence::{locate_sentence, split_sentences, SentenceSpan};
pub use view::{page_info, page_list, page_view, HighlightRange, PageListItem, PageView};

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::ReaderConfig;
use crate::document::{self, Document, DocumentResult};
use crate::speech::{
    filter_voices, SpeechEngine, SpeechError, SpeechEvent, SpeechHandle, Utterance, Voice,
};

/// Side effect surfaced to the UI layer by `pump`
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEffect {
    /// Remove the highlight from this sentence index
    ClearHighlight(usize),
    /// Highlight this sentence index
    SetHighlight(usize),
    /// Progress through the current page, as a fraction in `[0, 1]`
    Progress(f32),
    /// Continuous read-through advanced to this page
    PageAdvanced(usize),
    /// The last page finished; nothing left to read
    ReadingFinished,
}

/// All session state for one open document
pub struct ReaderSession {
    config: ReaderConfig,
    engine: Arc<dyn SpeechEngine>,
    document: Option<Document>,
    /// 1-based current page; 0 until a document with pages is loaded
    current_page: usize,
    playback: PlaybackController,
    handle: Option<Box<dyn SpeechHandle>>,
    /// Edit-mode draft of the current page text
    edit: Option<String>,
}

impl ReaderSession {
    pub fn new(config: ReaderConfig, engine: Arc<dyn SpeechEngine>) -> Self {
        Self {
            config,
            engine,
            document: None,
            current_page: 0,
            playback: PlaybackController::new(),
            handle: None,
            edit: None,
        }
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_count(&self) -> usize {
        self.document.as_ref().map_or(0, Document::page_count)
    }

    pub fn playback(&self) -> &PlaybackController {
        &self.playback
    }

    pub fn is_editing(&self) -> bool {
        self.edit.is_some()
    }

    /// Text of the current page, as stored in the document
    pub fn current_text(&self) -> Option<&str> {
        self.document
            .as_ref()
            .and_then(|d| d.page(self.current_page))
            .map(|p| p.text.as_str())
    }

    // ------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------

    /// Load a document from disk, replacing any previous one wholesale
    pub async fn load_path<P: AsRef<std::path::Path>>(&mut self, path: P) -> DocumentResult<()> {
        let document = document::load_path(path, self.config.paging).await?;
        self.install(document).await;
        Ok(())
    }

    /// Load a document from raw bytes plus its file name
    pub async fn load_bytes(&mut self, file_name: &str, bytes: Vec<u8>) -> DocumentResult<()> {
        let document = document::load_bytes(file_name, bytes, self.config.paging).await?;
        self.install(document).await;
        Ok(())
    }

    async fn install(&mut self, document: Document) {
        self.stop().await;
        self.edit = None;
        self.current_page = if document.page_count() > 0 { 1 } else { 0 };
        self.document = Some(document);
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Display a page by 1-based number; out-of-range numbers are a no-op.
    /// A page change resets playback.
    pub async fn go_to_page(&mut self, number: usize) -> bool {
        if number == 0 || number > self.page_count() {
            return false;
        }
        self.stop().await;
        self.current_page = number;
        true
    }

    /// Advance one page; no-op on the last page
    pub async fn next_page(&mut self) -> bool {
        self.go_to_page(self.current_page + 1).await
    }

    /// Go back one page; no-op on the first page
    pub async fn previous_page(&mut self) -> bool {
        if self.current_page <= 1 {
            return false;
        }
        self.go_to_page(self.current_page - 1).await
    }

    // ------------------------------------------------------------------
    // Playback
    // ------------------------------------------------------------------

    /// Start reading the current page aloud, or resume when paused.
    ///
    /// Cancels any in-flight speech, rebuilds sentence spans and hands the
    /// page text to the engine. Engine failures reset playback silently, per
    /// the error policy. Returns whether playback is running afterwards.
    pub async fn play(&mut self) -> bool {
        if self.edit.is_some() {
            debug!("play ignored while editing");
            return false;
        }

        if self.playback.state() == PlaybackState::Paused {
            if let Some(handle) = self.handle.as_mut() {
                if handle.resume().await.is_ok() && self.playback.resume() {
                    return true;
                }
            }
            // The engine lost the utterance; fall through to a fresh start
        }

        let Some(text) = self.current_text().map(str::to_string) else {
            return false;
        };
        if text.is_empty() {
            return false;
        }

        self.cancel_speech().await;
        self.playback.begin(&text);

        let utterance = Utterance {
            text,
            language: self.config.speech.language.clone(),
            rate: self.config.speech.rate,
            voice: self.config.speech.voice.clone(),
        };
        match self.engine.speak(&utterance).await {
            Ok(handle) => {
                self.handle = Some(handle);
                true
            }
            Err(e) => {
                warn!("speech engine error: {e}");
                self.playback.stop();
                false
            }
        }
    }

    /// Suspend speech output; valid only while playing. Progress and
    /// highlight are retained.
    pub async fn pause(&mut self) -> bool {
        if self.playback.state() != PlaybackState::Playing {
            return false;
        }
        if let Some(handle) = self.handle.as_mut() {
            if let Err(e) = handle.pause().await {
                warn!("pause failed: {e}");
            }
        }
        self.playback.pause()
    }

    /// Cancel speech and reset playback, from any state
    pub async fn stop(&mut self) -> Vec<SessionEffect> {
        self.cancel_speech().await;
        self.playback
            .stop()
            .into_iter()
            .filter_map(convert_effect)
            .collect()
    }

    /// Space-bar behavior: pause while playing, otherwise play
    pub async fn toggle(&mut self) -> bool {
        if self.playback.state() == PlaybackState::Playing {
            self.pause().await
        } else {
            self.play().await
        }
    }

    async fn cancel_speech(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            if let Err(e) = handle.cancel().await {
                warn!("cancel failed: {e}");
            }
        }
    }

    /// Wait for the next engine event and reduce it into UI effects.
    ///
    /// Returns `None` when no speech is in flight or the event stream has
    /// closed. On natural completion with a page remaining, the session
    /// advances and re-invokes `play` automatically (continuous
    /// read-through).
    pub async fn pump(&mut self) -> Option<Vec<SessionEffect>> {
        let event = match self.handle.as_mut() {
            Some(handle) => handle.next_event().await,
            None => return None,
        };
        let Some(event) = event else {
            self.handle = None;
            return None;
        };

        let mut completed = false;
        let mut effects = Vec::new();
        for effect in self.playback.on_event(&event) {
            match convert_effect(effect) {
                Some(e) => effects.push(e),
                None => completed = true,
            }
        }
        if matches!(event, SpeechEvent::Failed(_)) {
            self.handle = None;
        }

        if completed {
            self.handle = None;
            if self.current_page < self.page_count() {
                self.current_page += 1;
                effects.push(SessionEffect::PageAdvanced(self.current_page));
                self.play().await;
            } else {
                effects.push(SessionEffect::ReadingFinished);
            }
        }
        Some(effects)
    }

    /// Voices the engine offers for the session language, falling back to
    /// the full list
    pub async fn voices(&self) -> Result<Vec<Voice>, SpeechError> {
        let voices = self.engine.voices().await?;
        Ok(filter_voices(voices, &self.config.speech.language))
    }

    // ------------------------------------------------------------------
    // Edit mode
    // ------------------------------------------------------------------

    /// Enter edit mode on the current page. Forces a stop first; playback
    /// and editing are mutually exclusive. Returns the draft text.
    pub async fn begin_edit(&mut self) -> Option<String> {
        let text = self.current_text()?.to_string();
        self.stop().await;
        self.edit = Some(text.clone());
        Some(text)
    }

    /// Commit edited text into the current page and leave edit mode
    pub fn save_edit(&mut self, text: impl Into<String>) -> bool {
        if self.edit.take().is_none() {
            return false;
        }
        let page = self.current_page;
        match self.document.as_mut() {
            Some(doc) => doc.set_page_text(page, text.into()).is_ok(),
            None => false,
        }
    }

    /// Discard the draft and leave edit mode; the stored page text stands
    pub fn cancel_edit(&mut self) -> bool {
        self.edit.take().is_some()
    }
}

fn convert_effect(effect: PlaybackEffect) -> Option<SessionEffect> {
    match effect {
        PlaybackEffect::ClearHighlight(i) => Some(SessionEffect::ClearHighlight(i)),
        PlaybackEffect::SetHighlight(i) => Some(SessionEffect::SetHighlight(i)),
        PlaybackEffect::Progress(f) => Some(SessionEffect::Progress(f)),
        PlaybackEffect::Completed => None,
    }
}
