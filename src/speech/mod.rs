//! Speech synthesis seam
//!
//! The platform speech engine is an external collaborator. This module
//! defines the boundary: an `Utterance` goes in, asynchronous
//! start/boundary/finish/failure events come out, and the caller holds an
//! imperative pause/resume/cancel handle. `EspeakEngine` is the default
//! process-backed implementation; tests drive the session with a scripted
//! engine instead.

mod engine;
mod espeak;
mod types;

pub use engine::{SpeechEngine, SpeechHandle};
pub use espeak::EspeakEngine;
pub use types::{filter_voices, SpeechError, SpeechEvent, Utterance, Voice};
