//! Source-specific page construction
//!
//! One module per document source, each turning raw bytes into an ordered
//! sequence of `Page` entities:
//!
//! - `pdf`: one page per source page, extracted with `lopdf`
//! - `word`: `.docx` body text grouped into fixed paragraph-count pages
//! - `text`: plain text cut into fixed character windows
//!
//! All strategies are deterministic and total; malformed or empty input
//! degrades to zero/one-page documents where the container itself is
//! readable, and collapses into the document error taxonomy where it is not.

pub mod pdf;
pub mod text;
pub mod word;
