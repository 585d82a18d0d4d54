#![allow(dead_code)]

pub mod mock_asr;
pub mod mock_mic;
pub mod mock_search;
pub mod mock_tts;

use lexchat::config::Config;
use lexchat::input::InputMode;
use lexchat::processor::{Processor, Turn};
use lexchat::search::WebSearch;
use std::sync::Arc;
use tempfile::TempDir;

/// Isolated data directory plus a config pointing into it
pub struct TestContext {
    pub temp_dir: TempDir,
    pub config: Config,
}

impl TestContext {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = Config {
            user_name: "Tester".to_string(),
            data_dir: temp_dir.path().join("data").to_string_lossy().to_string(),
            tts_engine: "none".to_string(),
            ..Config::default()
        };
        Self { temp_dir, config }
    }

    pub fn processor(&self) -> Processor {
        self.processor_with(Arc::new(mock_search::MockSearch::default()))
    }

    pub fn processor_with(&self, search: Arc<dyn WebSearch>) -> Processor {
        Processor::new(&self.config, search)
    }
}

/// Feed a command and then each answer as text, returning every turn
pub async fn converse(processor: &mut Processor, inputs: &[&str]) -> Vec<Turn> {
    let mut turns = Vec::new();
    for input in inputs {
        turns.push(processor.process(input, InputMode::Text).await);
    }
    turns
}
