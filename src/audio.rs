//! Audio capture module
//!
//! Records fixed-length clips of mono 16-bit PCM through `arecord`.

use crate::error::{LexError, LexResult};
use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

/// RMS energy below which a clip is treated as silence
pub const SILENCE_THRESHOLD: f32 = 50.0;

/// Anything that can hand over one clip of mono 16-bit PCM
#[async_trait]
pub trait ClipSource: Send + Sync {
    async fn record(&self) -> LexResult<Vec<u8>>;

    /// Length of each clip in seconds
    fn seconds(&self) -> u64;
}

/// Fixed-duration microphone recorder
#[derive(Debug, Clone)]
pub struct Recorder {
    pub seconds: u64,
    pub sample_rate: u32,
    pub device: Option<String>,
}

impl Recorder {
    pub fn new(seconds: u64, sample_rate: u32) -> Self {
        Self {
            seconds: seconds.max(1),
            sample_rate,
            device: None,
        }
    }

    pub fn with_device(mut self, device: impl Into<String>) -> Self {
        self.device = Some(device.into());
        self
    }

    pub(crate) fn args(&self) -> Vec<String> {
        let mut args = vec![
            "-q".to_string(),
            "-f".to_string(),
            "S16_LE".to_string(),
            "-c".to_string(),
            "1".to_string(),
            "-r".to_string(),
            self.sample_rate.to_string(),
            "-t".to_string(),
            "raw".to_string(),
            "-d".to_string(),
            self.seconds.to_string(),
        ];
        if let Some(device) = &self.device {
            args.push("-D".to_string());
            args.push(device.clone());
        }
        args
    }

}

#[async_trait]
impl ClipSource for Recorder {
    /// Record one clip, returning raw little-endian PCM bytes
    async fn record(&self) -> LexResult<Vec<u8>> {
        info!("🎙️ Recording {}s at {} Hz", self.seconds, self.sample_rate);
        let output = Command::new("arecord")
            .args(self.args())
            .output()
            .await
            .map_err(|e| LexError::Audio(format!("could not start arecord: {}", e)))?;

        if !output.status.success() {
            return Err(LexError::Audio(format!(
                "arecord exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        debug!("Captured {} bytes of audio", output.stdout.len());
        Ok(output.stdout)
    }

    fn seconds(&self) -> u64 {
        self.seconds
    }
}

/// Decode little-endian 16-bit PCM
pub fn pcm_samples(bytes: &[u8]) -> Vec<i16> {
    bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect()
}

/// Calculate audio energy for VAD
pub fn calculate_energy(samples: &[i16]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }

    let sum: i64 = samples.iter().map(|&s| (s as i64).pow(2)).sum();
    (sum as f32 / samples.len() as f32).sqrt()
}

/// True when the clip holds nothing but silence
pub fn is_silent(bytes: &[u8]) -> bool {
    calculate_energy(&pcm_samples(bytes)) < SILENCE_THRESHOLD
}
