//! espeak-ng speech provider
//!
//! Drives the `espeak-ng` command-line synthesizer as a child process. The
//! CLI exposes no callback channel, so word-boundary events are paced from
//! the configured speaking rate; pause and resume stop and continue the
//! child with signals. Availability is probed with `--version` before use.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use super::engine::{SpeechEngine, SpeechHandle};
use super::types::{SpeechError, SpeechEvent, Utterance, Voice};

/// espeak-ng's base speaking rate in words per minute
const BASE_WPM: f32 = 175.0;

/// Buffered events between the pacing task and the consumer
const EVENT_CHANNEL_SIZE: usize = 32;

/// Process-backed engine speaking through `espeak-ng`
pub struct EspeakEngine {
    program: String,
}

impl EspeakEngine {
    pub fn new() -> Self {
        Self {
            program: "espeak-ng".to_string(),
        }
    }

    /// Use a different espeak-compatible binary (e.g. `espeak`)
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn words_per_minute(rate: f32) -> u32 {
        (BASE_WPM * rate.max(0.1)).round().clamp(80.0, 450.0) as u32
    }
}

impl Default for EspeakEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechEngine for EspeakEngine {
    fn name(&self) -> &str {
        &self.program
    }

    async fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("--version")
            .output()
            .await
            .is_ok()
    }

    async fn voices(&self) -> Result<Vec<Voice>, SpeechError> {
        let output = Command::new(&self.program)
            .arg("--voices")
            .output()
            .await
            .map_err(|e| SpeechError::Unavailable(format!("{}: {e}", self.program)))?;
        if !output.status.success() {
            return Err(SpeechError::Process(format!(
                "{} --voices exited with {}",
                self.program, output.status
            )));
        }
        Ok(parse_voice_listing(&String::from_utf8_lossy(&output.stdout)))
    }

    async fn speak(&self, utterance: &Utterance) -> Result<Box<dyn SpeechHandle>, SpeechError> {
        let voice = utterance
            .voice
            .clone()
            .unwrap_or_else(|| utterance.language.to_lowercase());
        let wpm = Self::words_per_minute(utterance.rate);

        let mut child = Command::new(&self.program)
            .arg("-v")
            .arg(&voice)
            .arg("-s")
            .arg(wpm.to_string())
            .arg(&utterance.text)
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| SpeechError::Process(format!("failed to spawn {}: {e}", self.program)))?;

        let pid = child.id();
        debug!(voice = %voice, wpm, pid, "utterance started");

        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_SIZE);
        let paused = Arc::new(AtomicBool::new(false));
        let paused_flag = paused.clone();
        let interval = Duration::from_secs_f32(60.0 / wpm as f32);
        let mut words = word_offsets(&utterance.text).into_iter();

        let task = tokio::spawn(async move {
            if tx.send(SpeechEvent::Started).await.is_err() {
                let _ = child.start_kill();
                return;
            }
            loop {
                tokio::select! {
                    status = child.wait() => {
                        let event = match status {
                            Ok(s) if s.success() => SpeechEvent::Finished,
                            Ok(s) => SpeechEvent::Failed(format!("engine exited with {s}")),
                            Err(e) => SpeechEvent::Failed(e.to_string()),
                        };
                        let _ = tx.send(event).await;
                        return;
                    }
                    _ = tokio::time::sleep(interval) => {
                        if paused_flag.load(Ordering::Relaxed) {
                            continue;
                        }
                        if let Some(char_offset) = words.next() {
                            if tx.send(SpeechEvent::Boundary { char_offset }).await.is_err() {
                                let _ = child.start_kill();
                                return;
                            }
                        }
                    }
                }
            }
        });

        Ok(Box::new(EspeakHandle {
            rx,
            pid,
            paused,
            task,
        }))
    }
}

struct EspeakHandle {
    rx: mpsc::Receiver<SpeechEvent>,
    pid: Option<u32>,
    paused: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

#[async_trait]
impl SpeechHandle for EspeakHandle {
    async fn next_event(&mut self) -> Option<SpeechEvent> {
        self.rx.recv().await
    }

    async fn pause(&mut self) -> Result<(), SpeechError> {
        if let Some(pid) = self.pid {
            signal(pid, "STOP")?;
        }
        self.paused.store(true, Ordering::Relaxed);
        Ok(())
    }

    async fn resume(&mut self) -> Result<(), SpeechError> {
        if let Some(pid) = self.pid {
            signal(pid, "CONT")?;
        }
        self.paused.store(false, Ordering::Relaxed);
        Ok(())
    }

    async fn cancel(&mut self) -> Result<(), SpeechError> {
        self.task.abort();
        if let Some(pid) = self.pid.take() {
            // A stopped child cannot die from TERM alone; signal failures
            // only mean the process is already gone
            let _ = signal(pid, "CONT");
            let _ = signal(pid, "TERM");
        }
        self.rx.close();
        Ok(())
    }
}

impl Drop for EspeakHandle {
    fn drop(&mut self) {
        self.task.abort();
        if let Some(pid) = self.pid.take() {
            let _ = signal(pid, "CONT");
            let _ = signal(pid, "TERM");
        }
    }
}

/// Deliver a signal to the child by pid
fn signal(pid: u32, name: &str) -> Result<(), SpeechError> {
    let status = std::process::Command::new("kill")
        .arg(format!("-{name}"))
        .arg(pid.to_string())
        .status()
        .map_err(|e| SpeechError::Process(format!("kill -{name} {pid}: {e}")))?;
    if status.success() {
        Ok(())
    } else {
        Err(SpeechError::Process(format!(
            "kill -{name} {pid} exited with {status}"
        )))
    }
}

/// Character offsets of each word start in the utterance text
fn word_offsets(text: &str) -> Vec<usize> {
    let mut offsets = Vec::new();
    let mut in_word = false;
    for (i, c) in text.chars().enumerate() {
        if c.is_whitespace() {
            in_word = false;
        } else if !in_word {
            offsets.push(i);
            in_word = true;
        }
    }
    offsets
}

/// Parse the table printed by `espeak-ng --voices`
fn parse_voice_listing(listing: &str) -> Vec<Voice> {
    listing
        .lines()
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 4 || fields[0].parse::<u32>().is_err() {
                return None;
            }
            Some(Voice {
                name: fields[3].to_string(),
                language: fields[1].to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_offsets_track_word_starts() {
        assert_eq!(word_offsets("Hello world. Hi"), vec![0, 6, 13]);
        assert_eq!(word_offsets("  leading"), vec![2]);
        assert!(word_offsets("   ").is_empty());
        assert!(word_offsets("").is_empty());
    }

    #[test]
    fn word_offsets_count_chars_not_bytes() {
        // "é" is 2 bytes but 1 char
        assert_eq!(word_offsets("é ação"), vec![0, 2]);
    }

    #[test]
    fn parse_voice_listing_skips_the_header() {
        let listing = "\
Pty Language       Age/Gender VoiceName          File                 Other Languages
 5  af              --/M      Afrikaans          gmw/af
 5  pt-br           --/M      Portuguese-Brazil  roa/pt-BR
 7  pt              --/M      Portuguese         roa/pt              (pt-pt 6)";
        let voices = parse_voice_listing(listing);
        assert_eq!(voices.len(), 3);
        assert_eq!(voices[1].name, "Portuguese-Brazil");
        assert_eq!(voices[1].language, "pt-br");
    }

    #[test]
    fn rate_multiplier_maps_onto_wpm() {
        assert_eq!(EspeakEngine::words_per_minute(1.0), 175);
        assert_eq!(EspeakEngine::words_per_minute(2.0), 350);
        assert_eq!(EspeakEngine::words_per_minute(0.1), 80);
        assert_eq!(EspeakEngine::words_per_minute(10.0), 450);
    }
}
