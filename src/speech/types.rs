//! Speech types
//!
//! Wire types for the speech-engine seam: the utterance handed to an engine,
//! the voices it enumerates, and the asynchronous events it emits while
//! speaking.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One synthesis request covering the full text of the current page
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    /// Text to speak
    pub text: String,
    /// BCP-47 language tag
    pub language: String,
    /// Rate multiplier over the engine's base speaking rate
    pub rate: f32,
    /// Voice name; engine default when unset
    pub voice: Option<String>,
}

/// An available synthesis voice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voice {
    pub name: String,
    /// Language tag the voice speaks
    pub language: String,
}

/// Asynchronous event delivered by an engine during playback
#[derive(Debug, Clone, PartialEq)]
pub enum SpeechEvent {
    /// Speech output began
    Started,
    /// The engine reached a word boundary at this character offset into the
    /// utterance text
    Boundary { char_offset: usize },
    /// The utterance completed naturally
    Finished,
    /// The engine failed; playback resets silently
    Failed(String),
}

/// Errors raised when starting or controlling an engine
#[derive(Debug, Error)]
pub enum SpeechError {
    /// No usable engine on this system
    #[error("Speech engine unavailable: {0}")]
    Unavailable(String),

    /// Engine process could not be started or signalled
    #[error("Engine process error: {0}")]
    Process(String),

    /// IO error talking to the engine
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Keep voices matching the session language, falling back to the full list
/// when none match
pub fn filter_voices(voices: Vec<Voice>, language: &str) -> Vec<Voice> {
    let prefix = primary_tag(language);
    let matching: Vec<Voice> = voices
        .iter()
        .filter(|v| primary_tag(&v.language) == prefix)
        .cloned()
        .collect();
    if matching.is_empty() {
        voices
    } else {
        matching
    }
}

fn primary_tag(language: &str) -> String {
    language
        .split(['-', '_'])
        .next()
        .unwrap_or(language)
        .to_lowercase()
}
