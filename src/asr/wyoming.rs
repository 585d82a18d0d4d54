//! Wyoming Protocol Client
//!
//! Implements the Wyoming protocol for external ASR services.
//! Wyoming is a simple protocol where events are JSON lines over TCP.
//!
//! Reference: https://github.com/rhasspy/wyoming

use super::Transcriber;
use crate::error::LexError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tracing::{debug, info, warn};

const TRANSCRIPT_TIMEOUT: Duration = Duration::from_secs(30);

/// Wyoming event types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum WyomingEvent {
    /// Describe request (handshake)
    #[serde(rename = "describe")]
    Describe,

    /// Start of audio stream
    #[serde(rename = "audio-start")]
    AudioStart(AudioFormat),

    /// Audio chunk
    #[serde(rename = "audio-chunk")]
    AudioChunk(AudioChunkData),

    /// End of audio stream
    #[serde(rename = "audio-stop")]
    AudioStop,

    /// Transcript result
    #[serde(rename = "transcript")]
    Transcript(TranscriptData),
}

/// Audio format data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudioFormat {
    pub rate: u32,
    pub width: u8,
    pub channels: u8,
}

/// Audio chunk data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioChunkData {
    #[serde(flatten)]
    pub format: AudioFormat,
    #[serde(with = "base64_bytes")]
    pub audio: Vec<u8>,
    #[serde(default)]
    pub timestamp: u64,
}

/// Transcript result data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptData {
    pub text: String,
}

/// Base64 serialization for audio bytes
mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        STANDARD.decode(&s).map_err(serde::de::Error::custom)
    }
}

/// Pull the transcript text out of one protocol line, if it carries one
pub fn parse_transcript(line: &str) -> Option<String> {
    match serde_json::from_str::<WyomingEvent>(line.trim()) {
        Ok(WyomingEvent::Transcript(data)) => Some(data.text),
        _ => None,
    }
}

/// Wyoming client for ASR services
#[derive(Debug, Clone)]
pub struct WyomingClient {
    host: String,
    port: u16,
    sample_rate: u32,
}

impl WyomingClient {
    /// Create a new Wyoming client
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            host: host.to_string(),
            port,
            sample_rate: 16000,
        }
    }

    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    fn format(&self) -> AudioFormat {
        AudioFormat {
            rate: self.sample_rate,
            width: 2,
            channels: 1,
        }
    }

    /// Serialized request sequence for one clip
    pub fn request_lines(&self, audio: &[u8]) -> Result<Vec<String>> {
        let events = [
            WyomingEvent::Describe,
            WyomingEvent::AudioStart(self.format()),
            WyomingEvent::AudioChunk(AudioChunkData {
                format: self.format(),
                audio: audio.to_vec(),
                timestamp: 0,
            }),
            WyomingEvent::AudioStop,
        ];
        events
            .iter()
            .map(|event| serde_json::to_string(event).map_err(anyhow::Error::from))
            .collect()
    }
}

#[async_trait]
impl Transcriber for WyomingClient {
    /// Sends audio to the Wyoming server and returns the transcript
    async fn transcribe(&self, pcm: &[u8]) -> Result<String> {
        let stream = TcpStream::connect((&*self.host, self.port))
            .await
            .map_err(|e| LexError::Asr(format!("Failed to connect to Wyoming server: {}", e)))?;

        let (reader, mut writer) = stream.into_split();
        let mut reader = BufReader::new(reader);

        for line in self.request_lines(pcm)? {
            writer.write_all(line.as_bytes()).await?;
            writer.write_all(b"\n").await?;
        }
        writer.flush().await?;

        debug!("Sent audio ({} bytes), waiting for transcript...", pcm.len());

        let transcript = tokio::time::timeout(TRANSCRIPT_TIMEOUT, async {
            let mut line = String::new();
            loop {
                line.clear();
                if reader.read_line(&mut line).await? == 0 {
                    break;
                }
                if let Some(text) = parse_transcript(&line) {
                    return Ok::<_, anyhow::Error>(text);
                }
                debug!("Wyoming event: {}", line.trim());
            }
            Ok(String::new())
        })
        .await
        .context("Timeout waiting for transcript")??;

        info!("📝 Wyoming transcript: '{}'", transcript);
        Ok(transcript)
    }

    /// Check if the server is available
    async fn health_check(&self) -> bool {
        match TcpStream::connect((&*self.host, self.port)).await {
            Ok(_) => {
                debug!("Wyoming server available at {}:{}", self.host, self.port);
                true
            }
            Err(e) => {
                warn!("Wyoming server not available: {}", e);
                false
            }
        }
    }

    fn name(&self) -> &str {
        "wyoming"
    }
}
