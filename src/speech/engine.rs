//! Speech engine trait
//!
//! The synthesis engine is an opaque asynchronous collaborator: it accepts
//! an utterance, emits start/boundary/finish/failure events while speaking,
//! and exposes imperative pause/resume/cancel control. The session never
//! blocks on it; a hung engine simply never delivers another event.

use async_trait::async_trait;

use super::types::{SpeechError, SpeechEvent, Utterance, Voice};

/// A speech synthesis backend
#[async_trait]
pub trait SpeechEngine: Send + Sync {
    /// Engine name for logs
    fn name(&self) -> &str;

    /// Whether the backend can produce speech on this system
    async fn is_available(&self) -> bool;

    /// Enumerate the voices the backend offers
    async fn voices(&self) -> Result<Vec<Voice>, SpeechError>;

    /// Start speaking an utterance, returning a handle that delivers events
    /// and accepts control
    async fn speak(&self, utterance: &Utterance) -> Result<Box<dyn SpeechHandle>, SpeechError>;
}

/// Control surface for one in-flight utterance
#[async_trait]
pub trait SpeechHandle: Send {
    /// Next engine event; `None` once the event stream has closed
    async fn next_event(&mut self) -> Option<SpeechEvent>;

    /// Suspend speech output without losing position
    async fn pause(&mut self) -> Result<(), SpeechError>;

    /// Resume suspended speech output
    async fn resume(&mut self) -> Result<(), SpeechError>;

    /// Cancel speech output immediately
    async fn cancel(&mut self) -> Result<(), SpeechError>;
}
