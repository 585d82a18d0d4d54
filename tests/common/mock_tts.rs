//! Mock TTS Engine for Testing
//!
//! Records all spoken text, and the voice it was spoken with, for verification.

use anyhow::Result;
use async_trait::async_trait;
use lexchat::voice::{VoiceMode, VoiceProfile};
use std::sync::{Arc, Mutex};

/// Mock TTS engine that records spoken text
#[derive(Debug, Clone)]
pub struct MockTts {
    /// All text that was "spoken", with the mode used
    pub spoken: Arc<Mutex<Vec<(String, VoiceMode)>>>,
    /// Simulate failure on every speak
    pub should_fail: Arc<Mutex<bool>>,
}

impl MockTts {
    pub fn new() -> Self {
        Self {
            spoken: Arc::new(Mutex::new(Vec::new())),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    /// Get all spoken phrases
    pub fn get_spoken(&self) -> Vec<String> {
        self.spoken
            .lock()
            .unwrap()
            .iter()
            .map(|(text, _)| text.clone())
            .collect()
    }

    /// Check if a phrase was spoken
    pub fn was_spoken(&self, text: &str) -> bool {
        self.spoken
            .lock()
            .unwrap()
            .iter()
            .any(|(s, _)| s.contains(text))
    }

    /// Mode used for the first phrase containing `text`
    pub fn mode_for(&self, text: &str) -> Option<VoiceMode> {
        self.spoken
            .lock()
            .unwrap()
            .iter()
            .find(|(s, _)| s.contains(text))
            .map(|(_, mode)| *mode)
    }
}

impl Default for MockTts {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl lexchat::tts::TtsEngine for MockTts {
    async fn speak(&self, text: &str, voice: &VoiceProfile) -> Result<()> {
        if *self.should_fail.lock().unwrap() {
            return Err(anyhow::anyhow!("Mock TTS failure"));
        }
        self.spoken
            .lock()
            .unwrap()
            .push((text.to_string(), voice.mode));
        Ok(())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_tts_records_speech() {
        use lexchat::tts::TtsEngine;

        let mock = MockTts::new();
        let voice = VoiceProfile::default();
        mock.speak("hello", &voice).await.unwrap();
        mock.speak("world", &voice).await.unwrap();

        assert!(mock.was_spoken("hello"));
        assert!(mock.was_spoken("world"));
        assert_eq!(mock.get_spoken().len(), 2);
        assert_eq!(mock.mode_for("hello"), Some(VoiceMode::Calm));
    }
}
