//! LEXchat Error Types
//!
//! Centralized error handling for the library side of the assistant.

use thiserror::Error;

/// Central error type for LEXchat
#[derive(Error, Debug)]
pub enum LexError {
    #[error("Audio capture error: {0}")]
    Audio(String),

    #[error("ASR engine error: {0}")]
    Asr(String),

    #[error("TTS engine error: {0}")]
    Tts(String),

    #[error("Search error: {0}")]
    Search(String),

    #[error("Drawing error: {0}")]
    Draw(String),

    #[error("Unknown voice mode: {0}")]
    UnknownVoiceMode(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Result type alias for LEXchat operations
pub type LexResult<T> = Result<T, LexError>;
