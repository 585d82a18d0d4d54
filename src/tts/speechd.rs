//! speechd-ng backend over the session D-Bus
//!
//! Each reply goes out through `SpeakVoice`: the profile's gender and mode
//! pick the voice, and rate and volume ride along as SSML prosody.

use crate::tts::TtsEngine;
use crate::voice::{VoiceGender, VoiceMode, VoiceProfile};
use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, info};
use zbus::{proxy, Connection};

#[proxy(
    interface = "org.speech.Service",
    default_service = "org.speech.Service",
    default_path = "/org/speech/Service"
)]
trait SpeechService {
    fn speak_voice(&self, text: &str, voice: &str) -> zbus::Result<()>;
    fn ping(&self) -> zbus::Result<String>;
}

/// Balanced-mode rate; prosody is expressed relative to it
const BASE_RATE: u32 = 175;

#[derive(Debug)]
pub struct SpeechdEngine {
    service: SpeechServiceProxy<'static>,
}

impl SpeechdEngine {
    /// Connect and make sure the service answers before it is used
    pub async fn connect() -> Result<Self> {
        let connection = Connection::session()
            .await
            .context("no D-Bus session bus")?;
        let service = SpeechServiceProxy::new(&connection).await?;
        let reply = service
            .ping()
            .await
            .context("speechd-ng not responding")?;
        info!("🔊 speechd-ng ready ({})", reply);
        Ok(Self { service })
    }
}

/// Voice name for the profile, in espeak-ng `language+variant` form
pub(crate) fn voice_name(voice: &VoiceProfile) -> String {
    let variant = match (voice.gender, voice.mode) {
        (VoiceGender::Female, VoiceMode::Energetic) => "f4",
        (VoiceGender::Female, _) => "f3",
        (VoiceGender::Male, VoiceMode::Energetic) => "m4",
        (VoiceGender::Male, _) => "m3",
    };
    format!("en+{}", variant)
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Wrap the text in SSML carrying the profile's rate and volume
pub(crate) fn ssml(text: &str, voice: &VoiceProfile) -> String {
    let rate = voice.rate * 100 / BASE_RATE;
    let volume = (voice.volume.clamp(0.0, 1.0) * 100.0).round() as u32;
    format!(
        r#"<speak><prosody rate="{}%" volume="{}%">{}</prosody></speak>"#,
        rate,
        volume,
        escape_xml(text)
    )
}

#[async_trait]
impl TtsEngine for SpeechdEngine {
    async fn speak(&self, text: &str, voice: &VoiceProfile) -> Result<()> {
        let name = voice_name(voice);
        debug!("speechd-ng speaking as {} ({})", name, voice.mode);
        self.service.speak_voice(&ssml(text, voice), &name).await?;
        Ok(())
    }

    fn name(&self) -> &str {
        "speechd_ng"
    }
}
