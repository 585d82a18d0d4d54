//! Mock Microphone for Testing
//!
//! Hands out a fixed clip on every recording and counts how often it was asked.

use async_trait::async_trait;
use lexchat::audio::ClipSource;
use lexchat::error::{LexError, LexResult};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock clip source standing in for `arecord`
#[derive(Debug, Default)]
pub struct MockMic {
    pub clip: Vec<u8>,
    pub recordings: AtomicUsize,
    /// Simulate a missing or busy device
    pub should_fail: bool,
}

impl MockMic {
    /// Clip loud enough to pass the silence check
    pub fn speaking() -> Self {
        Self {
            clip: std::iter::repeat(2000i16.to_le_bytes())
                .take(1600)
                .flatten()
                .collect(),
            ..Self::default()
        }
    }

    pub fn silent() -> Self {
        Self {
            clip: vec![0u8; 3200],
            ..Self::default()
        }
    }

    pub fn recordings(&self) -> usize {
        self.recordings.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ClipSource for MockMic {
    async fn record(&self) -> LexResult<Vec<u8>> {
        self.recordings.fetch_add(1, Ordering::SeqCst);
        if self.should_fail {
            return Err(LexError::Audio("mock device busy".to_string()));
        }
        Ok(self.clip.clone())
    }

    fn seconds(&self) -> u64 {
        1
    }
}
