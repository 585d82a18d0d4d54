//! Console-only engine: replies are printed but never spoken

use super::TtsEngine;
use crate::voice::VoiceProfile;
use anyhow::Result;
use async_trait::async_trait;

#[derive(Debug, Default)]
pub struct SilentEngine;

#[async_trait]
impl TtsEngine for SilentEngine {
    async fn speak(&self, _text: &str, _voice: &VoiceProfile) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "silent"
    }
}
