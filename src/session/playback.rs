//! Playback state machine
//!
//! A pure reducer over speech-engine events. The controller owns the
//! playback state for one page (state, sentence spans, current sentence,
//! progress fraction) and turns each incoming event into a list of effects
//! for the caller to apply. It never touches the engine itself, which keeps
//! every transition deterministically testable.

use tracing::debug;

use super::sentence::{locate_sentence, split_sentences, SentenceSpan};
use crate::speech::SpeechEvent;

/// Playback lifecycle: `Idle -> Playing -> {Paused, Idle}`,
/// `Paused -> {Playing, Idle}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing,
    Paused,
}

/// Side effect requested by the reducer
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEffect {
    /// Remove the highlight from this sentence index
    ClearHighlight(usize),
    /// Highlight this sentence index
    SetHighlight(usize),
    /// Progress through the page text, as a fraction in `[0, 1]`
    Progress(f32),
    /// The utterance completed naturally
    Completed,
}

/// State for one playback session over one page of text
#[derive(Debug, Default)]
pub struct PlaybackController {
    state: PlaybackState,
    spans: Vec<SentenceSpan>,
    text_chars: usize,
    sentence_index: usize,
    highlighted: Option<usize>,
    progress: f32,
}

impl PlaybackController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Current sentence index; always within `[0, sentence count)` or reset
    /// to 0
    pub fn sentence_index(&self) -> usize {
        self.sentence_index
    }

    /// Fraction of the current page text consumed, in `[0, 1]`
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn sentence_count(&self) -> usize {
        self.spans.len()
    }

    /// Span of the currently highlighted sentence, if any
    pub fn highlighted_span(&self) -> Option<&SentenceSpan> {
        self.highlighted.and_then(|i| self.spans.get(i))
    }

    /// Start a playback session over `text`: rebuild sentence spans, reset
    /// progress and transition to `Playing`
    pub fn begin(&mut self, text: &str) {
        self.spans = split_sentences(text);
        self.text_chars = text.chars().count();
        self.sentence_index = 0;
        self.highlighted = None;
        self.progress = 0.0;
        self.state = PlaybackState::Playing;
        debug!(sentences = self.spans.len(), "playback started");
    }

    /// Suspend playback; valid only from `Playing`. Progress and highlight
    /// are retained. Returns whether a transition happened.
    pub fn pause(&mut self) -> bool {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
            true
        } else {
            false
        }
    }

    /// Resume from `Paused` without resetting the sentence index
    pub fn resume(&mut self) -> bool {
        if self.state == PlaybackState::Paused {
            self.state = PlaybackState::Playing;
            true
        } else {
            false
        }
    }

    /// Stop unconditionally, from any state: clear highlight state, reset
    /// sentence index and progress, transition to `Idle`
    pub fn stop(&mut self) -> Vec<PlaybackEffect> {
        let mut effects = Vec::new();
        if let Some(old) = self.highlighted.take() {
            effects.push(PlaybackEffect::ClearHighlight(old));
        }
        self.state = PlaybackState::Idle;
        self.sentence_index = 0;
        self.progress = 0.0;
        effects.push(PlaybackEffect::Progress(0.0));
        effects
    }

    /// Reduce one engine event into state plus effects
    pub fn on_event(&mut self, event: &SpeechEvent) -> Vec<PlaybackEffect> {
        match event {
            SpeechEvent::Started => Vec::new(),
            SpeechEvent::Boundary { char_offset } => self.on_boundary(*char_offset),
            SpeechEvent::Finished => {
                // Highlight is left in place; the next begin() or stop()
                // clears it
                self.state = PlaybackState::Idle;
                self.progress = 0.0;
                vec![PlaybackEffect::Progress(0.0), PlaybackEffect::Completed]
            }
            SpeechEvent::Failed(reason) => {
                debug!(reason = %reason, "speech engine failed; resetting playback");
                self.stop()
            }
        }
    }

    fn on_boundary(&mut self, char_offset: usize) -> Vec<PlaybackEffect> {
        if self.state != PlaybackState::Playing {
            return Vec::new();
        }

        let fraction = if self.text_chars == 0 {
            0.0
        } else {
            (char_offset as f32 / self.text_chars as f32).min(1.0)
        };
        self.progress = fraction;
        let mut effects = vec![PlaybackEffect::Progress(fraction)];

        // Offsets past the text find no sentence; the last highlight stays
        if let Some(index) = locate_sentence(&self.spans, char_offset) {
            if self.highlighted != Some(index) {
                if let Some(old) = self.highlighted {
                    effects.push(PlaybackEffect::ClearHighlight(old));
                }
                self.highlighted = Some(index);
                self.sentence_index = index;
                effects.push(PlaybackEffect::SetHighlight(index));
            }
        }
        effects
    }
}
