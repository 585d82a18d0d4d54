//! System TTS engine
//!
//! Drives `espeak-ng`, falling back to `spd-say`, with rate, volume and
//! voice taken from the active profile.

use super::TtsEngine;
use crate::error::LexError;
use crate::voice::{VoiceGender, VoiceProfile};
use anyhow::Result;
use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

#[derive(Debug)]
pub struct SystemEngine;

impl Default for SystemEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemEngine {
    pub fn new() -> Self {
        Self
    }

    pub(crate) fn espeak_args(text: &str, voice: &VoiceProfile) -> Vec<String> {
        let variant = match voice.gender {
            VoiceGender::Female => "en+f3",
            VoiceGender::Male => "en+m3",
        };
        vec![
            "-s".to_string(),
            voice.rate.to_string(),
            "-a".to_string(),
            ((voice.volume * 100.0).round() as u32).to_string(),
            "-v".to_string(),
            variant.to_string(),
            text.to_string(),
        ]
    }

    /// spd-say takes rate and volume on a -100..100 scale
    pub(crate) fn spd_args(text: &str, voice: &VoiceProfile) -> Vec<String> {
        let rate = ((voice.rate as i32 - 175) * 2).clamp(-100, 100);
        let volume = ((voice.volume * 200.0) as i32 - 100).clamp(-100, 100);
        let gender = match voice.gender {
            VoiceGender::Female => "female1",
            VoiceGender::Male => "male1",
        };
        vec![
            "-w".to_string(),
            "-r".to_string(),
            rate.to_string(),
            "-i".to_string(),
            volume.to_string(),
            "-t".to_string(),
            gender.to_string(),
            text.to_string(),
        ]
    }
}

#[async_trait]
impl TtsEngine for SystemEngine {
    async fn speak(&self, text: &str, voice: &VoiceProfile) -> Result<()> {
        debug!("System speaking ({}): {}", voice.mode, text);

        if let Ok(status) = Command::new("espeak-ng")
            .args(Self::espeak_args(text, voice))
            .status()
            .await
        {
            if status.success() {
                return Ok(());
            }
        }

        if let Ok(status) = Command::new("spd-say")
            .args(Self::spd_args(text, voice))
            .status()
            .await
        {
            if status.success() {
                return Ok(());
            }
        }

        Err(LexError::Tts("No system TTS command found (tried espeak-ng, spd-say)".into()).into())
    }

    fn name(&self) -> &str {
        "system"
    }
}
