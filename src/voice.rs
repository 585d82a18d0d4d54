//! Voice profiles
//!
//! A `VoiceProfile` is an immutable value describing how replies are spoken.
//! Changing the mode builds a fresh profile; nothing is mutated in place.

use crate::error::LexError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named speaking style selectable by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceMode {
    Calm,
    Balanced,
    Energetic,
}

impl VoiceMode {
    pub const ALL: [VoiceMode; 3] = [VoiceMode::Calm, VoiceMode::Balanced, VoiceMode::Energetic];

    pub fn as_str(&self) -> &'static str {
        match self {
            VoiceMode::Calm => "calm",
            VoiceMode::Balanced => "balanced",
            VoiceMode::Energetic => "energetic",
        }
    }
}

impl fmt::Display for VoiceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoiceMode {
    type Err = LexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "calm" => Ok(VoiceMode::Calm),
            "balanced" => Ok(VoiceMode::Balanced),
            "energetic" => Ok(VoiceMode::Energetic),
            other => Err(LexError::UnknownVoiceMode(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceGender {
    Female,
    Male,
}

/// Speaking parameters handed to the TTS engine with every utterance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceProfile {
    pub mode: VoiceMode,
    /// Words per minute
    pub rate: u32,
    /// 0.0 - 1.0
    pub volume: f32,
    pub gender: VoiceGender,
}

impl VoiceProfile {
    pub fn for_mode(mode: VoiceMode) -> Self {
        match mode {
            VoiceMode::Calm => Self {
                mode,
                rate: 150,
                volume: 0.85,
                gender: VoiceGender::Female,
            },
            VoiceMode::Balanced => Self {
                mode,
                rate: 175,
                volume: 0.95,
                gender: VoiceGender::Male,
            },
            VoiceMode::Energetic => Self {
                mode,
                rate: 200,
                volume: 1.0,
                gender: VoiceGender::Male,
            },
        }
    }
}

impl Default for VoiceProfile {
    fn default() -> Self {
        Self::for_mode(VoiceMode::Calm)
    }
}
