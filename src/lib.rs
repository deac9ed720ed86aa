//! Leitura
//!
//! A document read-aloud reader: PDF, Word and plain-text files become
//! paginated, editable text that is spoken aloud with the current sentence
//! highlighted in real time. Parsing and speech production are delegated to
//! external collaborators; this crate owns the glue — pagination across
//! heterogeneous sources, mapping engine character-offset callbacks onto
//! sentence spans, and the playback/edit state machine.
//!
//! # Modules
//!
//! - `document`: paginated document model and loading (classification,
//!   parser dispatch)
//! - `formats`: source-specific page construction (PDF, Word, plain text)
//! - `paginate`: pure pagination strategies shared by the formats
//! - `session`: the reading session — sentence tracking, playback state
//!   machine, edit mode, view projections
//! - `speech`: the speech-engine seam and the espeak-ng provider
//! - `config`: runtime tunables with environment overrides

pub mod config;
pub mod document;
pub mod formats;
pub mod paginate;
pub mod session;
pub mod speech;

// Re-export the types a consumer touches first
pub use config::ReaderConfig;
pub use document::{Document, DocumentError, Page, SourceKind};
pub use session::{ReaderSession, SessionEffect};
pub use speech::{EspeakEngine, SpeechEngine};
