//! ASR (Automatic Speech Recognition) Module
//!
//! Speech-to-text sits behind the `Transcriber` trait. The bundled backend is
//! a Wyoming protocol client (e.g. a faster-whisper server).

pub mod wyoming;

use crate::config::Config;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub use wyoming::WyomingClient;

/// Trait for speech-to-text backends
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe a clip of mono 16-bit PCM; an empty string means nothing
    /// intelligible was heard
    async fn transcribe(&self, pcm: &[u8]) -> Result<String>;

    /// Whether the backend looks reachable
    async fn health_check(&self) -> bool {
        true
    }

    /// Get the backend name
    fn name(&self) -> &str;
}

/// Factory to create the configured transcriber
pub fn create_transcriber(config: &Config) -> Arc<dyn Transcriber> {
    Arc::new(
        WyomingClient::new(&config.wyoming_host, config.wyoming_port)
            .with_sample_rate(config.sample_rate),
    )
}
