//! LEXchat - voice and text command-line assistant

use anyhow::{Context, Result};
use clap::Parser;
use lexchat::asr;
use lexchat::audio::Recorder;
use lexchat::config::Config;
use lexchat::processor::Processor;
use lexchat::search::DuckDuckGo;
use lexchat::session::{Session, VoiceCapture};
use lexchat::tts::{self, Speaker, TtsEngine};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::io::BufReader;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Directory for history, last search, drawings, snippets and the log
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Speech output engine (system, speechd, none)
    #[arg(long)]
    tts: Option<String>,
}

fn init_logging(config: &Config, verbose: bool) -> Result<()> {
    let level = if verbose {
        "debug".to_string()
    } else {
        config.log_level.to_lowercase()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let log_path = config.log_path();
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating data directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("opening log file {}", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load()?;
    if let Some(dir) = &args.data_dir {
        config.data_dir = dir.to_string_lossy().to_string();
    }
    if let Some(engine) = &args.tts {
        config.tts_engine = engine.clone();
    }

    init_logging(&config, args.verbose)?;
    info!("🐧 LEXchat v{} starting...", env!("CARGO_PKG_VERSION"));

    let engine: Arc<dyn TtsEngine> = match tts::create_engine(&config).await {
        Ok(engine) => engine,
        Err(e) => {
            warn!("TTS engine '{}' unavailable ({}), printing only", config.tts_engine, e);
            Arc::new(tts::silent::SilentEngine)
        }
    };
    let speaker = Speaker::new(engine);
    info!("🔊 Speaking through '{}'", speaker.engine_name());

    let search = Arc::new(DuckDuckGo::new()?);
    let processor = Processor::new(&config, search);

    let transcriber = asr::create_transcriber(&config);
    if !transcriber.health_check().await {
        warn!("Voice input will fail until the speech-to-text server is reachable");
    }
    let capture = VoiceCapture {
        recorder: Arc::new(Recorder::new(config.record_seconds, config.sample_rate)),
        transcriber,
    };

    let stdin = BufReader::new(tokio::io::stdin());
    let mut session = Session::new(processor, speaker, stdin).with_capture(capture);

    let interrupted = tokio::select! {
        result = session.run() => {
            result?;
            false
        }
        _ = tokio::signal::ctrl_c() => true,
    };
    if interrupted {
        session.interrupt().await;
        info!("👋 LEXchat interrupted");
        // A pending stdin read would otherwise hold up runtime shutdown
        std::process::exit(0);
    }

    info!("👋 LEXchat stopped");
    Ok(())
}
