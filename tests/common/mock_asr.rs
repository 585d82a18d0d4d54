//! Mock Transcriber for Testing
//!
//! Hands back queued transcripts in order and records every clip it receives.

use anyhow::Result;
use async_trait::async_trait;
use lexchat::asr::Transcriber;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Mock speech-to-text backend with canned transcripts
pub struct MockTranscriber {
    /// Queue of transcripts to return; an empty queue means nothing was heard
    pub responses: Mutex<VecDeque<String>>,
    /// Record all clips received (for verification)
    pub received: Arc<Mutex<Vec<Vec<u8>>>>,
    /// Simulate an unreachable service
    pub should_fail: bool,
}

impl MockTranscriber {
    pub fn new(responses: &[&str]) -> Self {
        Self {
            responses: Mutex::new(responses.iter().map(|s| s.to_string()).collect()),
            received: Arc::new(Mutex::new(Vec::new())),
            should_fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::new(&[])
        }
    }
}

#[async_trait]
impl Transcriber for MockTranscriber {
    async fn transcribe(&self, pcm: &[u8]) -> Result<String> {
        self.received.lock().unwrap().push(pcm.to_vec());
        if self.should_fail {
            return Err(anyhow::anyhow!("Mock ASR failure"));
        }
        Ok(self.responses.lock().unwrap().pop_front().unwrap_or_default())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_transcriber_returns_queue_in_order() {
        let mock = MockTranscriber::new(&["hello", "bye"]);
        assert_eq!(mock.transcribe(&[1, 2]).await.unwrap(), "hello");
        assert_eq!(mock.transcribe(&[3, 4]).await.unwrap(), "bye");
        assert_eq!(mock.transcribe(&[]).await.unwrap(), "");
        assert_eq!(mock.received.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_mock_transcriber_failure() {
        let mock = MockTranscriber::failing();
        assert!(mock.health_check().await);
        assert!(mock.transcribe(&[0]).await.is_err());
    }
}
