//! Configuration management
//!
//! Runtime tunables with sensible defaults, overridable through `LEITURA_*`
//! environment variables (loaded from `.env` by the binary).

use std::env;

use serde::Deserialize;

use crate::paginate::{DEFAULT_CHARS_PER_PAGE, DEFAULT_PARAGRAPHS_PER_PAGE, DEFAULT_PREVIEW_LEN};

#[derive(Debug, Clone, Deserialize)]
pub struct ReaderConfig {
    pub speech: SpeechConfig,
    pub paging: PagingConfig,
}

/// Speech synthesis parameters applied to every utterance
#[derive(Debug, Clone, Deserialize)]
pub struct SpeechConfig {
    /// BCP-47 language tag for synthesis and voice filtering
    pub language: String,
    /// Rate multiplier over the engine's base speaking rate
    pub rate: f32,
    /// Preferred voice name; engine default when unset
    pub voice: Option<String>,
}

/// Pagination tunables for Word and plain-text sources
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PagingConfig {
    pub paragraphs_per_page: usize,
    pub chars_per_page: usize,
    pub preview_len: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        ReaderConfig {
            speech: SpeechConfig::default(),
            paging: PagingConfig::default(),
        }
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        SpeechConfig {
            language: "pt-BR".to_string(),
            rate: 1.0,
            voice: None,
        }
    }
}

impl Default for PagingConfig {
    fn default() -> Self {
        PagingConfig {
            paragraphs_per_page: DEFAULT_PARAGRAPHS_PER_PAGE,
            chars_per_page: DEFAULT_CHARS_PER_PAGE,
            preview_len: DEFAULT_PREVIEW_LEN,
        }
    }
}

impl ReaderConfig {
    /// Build a configuration from the environment, falling back to defaults
    /// for anything unset or unparseable
    pub fn from_env() -> Self {
        let defaults = ReaderConfig::default();
        ReaderConfig {
            speech: SpeechConfig {
                language: env::var("LEITURA_LANGUAGE")
                    .unwrap_or_else(|_| defaults.speech.language.clone()),
                rate: env_parse("LEITURA_RATE", defaults.speech.rate),
                voice: env::var("LEITURA_VOICE").ok(),
            },
            paging: PagingConfig {
                paragraphs_per_page: env_parse(
                    "LEITURA_PARAGRAPHS_PER_PAGE",
                    defaults.paging.paragraphs_per_page,
                ),
                chars_per_page: env_parse("LEITURA_CHARS_PER_PAGE", defaults.paging.chars_per_page),
                preview_len: env_parse("LEITURA_PREVIEW_LEN", defaults.paging.preview_len),
            },
        }
    }
}

fn env_parse<T: std::str::FromStr + Copy>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_tunables() {
        let config = ReaderConfig::default();
        assert_eq!(config.speech.language, "pt-BR");
        assert_eq!(config.speech.rate, 1.0);
        assert!(config.speech.voice.is_none());
        assert_eq!(config.paging.paragraphs_per_page, 12);
        assert_eq!(config.paging.chars_per_page, 1500);
        assert_eq!(config.paging.preview_len, 100);
    }
}
