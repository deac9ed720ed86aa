//! Leitura CLI
//!
//! Opens a document, prints its pages, and optionally reads it aloud with
//! per-sentence highlighting through the espeak-ng provider.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use leitura::config::ReaderConfig;
use leitura::session::{self, ReaderSession, SessionEffect};
use leitura::speech::{EspeakEngine, SpeechEngine};

#[derive(Parser)]
#[command(name = "leitura", version, about = "Read documents aloud, page by page")]
struct Cli {
    /// Document to open (.pdf, .docx or .txt)
    file: PathBuf,

    /// Page to display first (1-based)
    #[arg(long, default_value_t = 1)]
    page: usize,

    /// Print the page list as JSON and exit
    #[arg(long)]
    json: bool,

    /// List the voices available for the configured language and exit
    #[arg(long)]
    voices: bool,

    /// Read aloud from the selected page to the end of the document
    #[arg(long)]
    speak: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "leitura=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();
    let config = ReaderConfig::from_env();
    let cli = Cli::parse();

    tracing::info!("Starting Leitura v{}", env!("CARGO_PKG_VERSION"));

    let engine = Arc::new(EspeakEngine::new());
    if cli.speak && !engine.is_available().await {
        anyhow::bail!("speech engine not found; install espeak-ng to use --speak");
    }
    let mut session = ReaderSession::new(config, engine);

    if let Err(e) = session.load_path(&cli.file).await {
        tracing::error!("load failed: {e}");
        eprintln!("Could not load {}", cli.file.display());
        std::process::exit(1);
    }

    if cli.voices {
        for voice in session.voices().await.context("voice enumeration failed")? {
            println!("{}\t{}", voice.name, voice.language);
        }
        return Ok(());
    }

    session.go_to_page(cli.page).await;

    if cli.json {
        let list = session::page_list(&session);
        println!("{}", serde_json::to_string_pretty(&list)?);
        return Ok(());
    }

    println!("{}", session::page_info(&session));
    if let Some(view) = session::page_view(&session) {
        println!("\n{}\n", view.text);
    }

    if cli.speak {
        read_aloud(&mut session).await;
    }

    Ok(())
}

/// Drive a full read-aloud session, printing sentence transitions and
/// progress as the engine reports them
async fn read_aloud(session: &mut ReaderSession) {
    if !session.play().await {
        eprintln!("Speech engine unavailable; is espeak-ng installed?");
        return;
    }

    while let Some(effects) = session.pump().await {
        for effect in effects {
            match effect {
                SessionEffect::SetHighlight(index) => {
                    if let Some(span) = session.playback().highlighted_span() {
                        println!("[{}] {}", index + 1, span.text.trim());
                    }
                }
                SessionEffect::Progress(fraction) => {
                    tracing::debug!(percent = (fraction * 100.0) as u32, "progress");
                }
                SessionEffect::PageAdvanced(page) => {
                    println!("\n--- {} ---\n", session::page_info(session));
                    tracing::info!(page, "continuing onto next page");
                }
                SessionEffect::ReadingFinished => {
                    println!("\nDone.");
                }
                SessionEffect::ClearHighlight(_) => {}
            }
        }
    }
}
