//! TTS (Text-to-Speech) Module
//!
//! Provides a unified interface for multiple TTS backends and the `Speaker`
//! that prints, logs and speaks every reply.

use crate::config::Config;
use crate::voice::VoiceProfile;
use anyhow::Result;
use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

pub mod silent;
pub mod speechd;
pub mod system;

/// Default pause between spoken sentences
pub const SENTENCE_PAUSE: Duration = Duration::from_millis(340);

/// Trait for TTS engines
#[async_trait]
pub trait TtsEngine: Send + Sync + std::fmt::Debug {
    /// Speak the given text with the given voice, returning once playback ends
    async fn speak(&self, text: &str, voice: &VoiceProfile) -> Result<()>;

    /// Get the engine name
    fn name(&self) -> &str;
}

/// Factory to create the configured TTS engine
pub async fn create_engine(config: &Config) -> Result<Arc<dyn TtsEngine>> {
    info!("🛠️ Creating TTS engine: {}", config.tts_engine);
    let engine: Arc<dyn TtsEngine> = match config.tts_engine.as_str() {
        "speechd_ng" | "speechd" => {
            info!("  - Using Speechd TTS");
            let client = speechd::SpeechdEngine::connect().await?;
            Arc::new(client)
        }
        "system" => {
            info!("  - Using System TTS");
            Arc::new(system::SystemEngine::new())
        }
        "none" | "silent" => {
            info!("  - Speech output disabled");
            Arc::new(silent::SilentEngine)
        }
        _ => {
            warn!(
                "  - Unknown engine '{}', falling back to System",
                config.tts_engine
            );
            Arc::new(system::SystemEngine::new())
        }
    };
    info!("✅ TTS engine '{}' initialized", engine.name());
    Ok(engine)
}

lazy_static! {
    static ref SENTENCE_END: Regex = Regex::new(r"[.!?]\s+").expect("valid regex");
}

/// Split text after sentence-ending punctuation
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for m in SENTENCE_END.find_iter(text) {
        // keep the punctuation, drop the whitespace
        let end = m.start() + 1;
        sentences.push(text[start..end].trim().to_string());
        start = m.end();
    }
    sentences.push(text[start..].trim().to_string());
    sentences.retain(|s| !s.is_empty());
    sentences
}

/// Prints, logs and speaks replies
#[derive(Debug, Clone)]
pub struct Speaker {
    engine: Arc<dyn TtsEngine>,
    pause: Duration,
}

impl Speaker {
    pub fn new(engine: Arc<dyn TtsEngine>) -> Self {
        Self {
            engine,
            pause: SENTENCE_PAUSE,
        }
    }

    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    pub fn engine_name(&self) -> &str {
        self.engine.name()
    }

    /// Print the reply and speak it sentence by sentence
    pub async fn respond(&self, voice: &VoiceProfile, text: &str) {
        if text.is_empty() {
            return;
        }
        println!("LEXchat: {}", text);
        info!("SPEAK: {}", text);

        for sentence in split_sentences(text) {
            if let Err(e) = self.engine.speak(&sentence, voice).await {
                warn!("TTS failed ({}): {}", self.engine.name(), e);
            }
            if !self.pause.is_zero() {
                tokio::time::sleep(self.pause).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sentences() {
        assert_eq!(
            split_sentences("Hello there. How are you? Great!"),
            vec!["Hello there.", "How are you?", "Great!"]
        );
        assert_eq!(split_sentences("No punctuation"), vec!["No punctuation"]);
        assert_eq!(split_sentences("Version 1.5 is out."), vec!["Version 1.5 is out."]);
        assert!(split_sentences("   ").is_empty());
    }
}
