use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::voice::VoiceMode;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // Persona
    pub user_name: String,

    // Speech
    pub default_voice_mode: VoiceMode,
    pub tts_engine: String,
    pub record_seconds: u64,
    pub sample_rate: u32,

    // Wyoming
    pub wyoming_host: String,
    pub wyoming_port: u16,

    // Search
    pub search_results: usize,

    // Data
    pub history_limit: usize,
    pub data_dir: String,

    // Meta
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_name: "friend".to_string(),
            default_voice_mode: VoiceMode::Calm,
            tts_engine: "system".to_string(),
            record_seconds: 4,
            sample_rate: 16000,
            wyoming_host: "localhost".to_string(),
            wyoming_port: 10300,
            search_results: 5,
            history_limit: 300,
            data_dir: dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("lexchat")
                .to_string_lossy()
                .to_string(),
            log_level: "INFO".to_string(),
        }
    }
}

impl Config {
    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = config_path();
        if !path.exists() {
            let config = Self::default();
            if let Err(e) = config.save() {
                tracing::warn!("Could not write default config to {}: {}", path.display(), e);
            }
            return Ok(config);
        }
        Self::load_from(&path)
    }

    /// Load config from an explicit path with graceful degradation
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        match serde_json::from_str(&content) {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::warn!("⚠️ Config file corrupted or invalid, using defaults: {}", e);
                let backup_path = path.with_extension("json.corrupt");
                let _ = std::fs::rename(path, &backup_path);
                Ok(Self::default())
            }
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let config_path = config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }

    pub fn history_path(&self) -> PathBuf {
        self.data_path().join("lexchat_history.json")
    }

    pub fn last_search_path(&self) -> PathBuf {
        self.data_path().join("last_search.json")
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_path().join("lexchat.log")
    }

    pub fn drawings_dir(&self) -> PathBuf {
        self.data_path().join("drawings")
    }

    pub fn snippets_dir(&self) -> PathBuf {
        self.data_path().join("snippets")
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lexchat")
        .join("config.json")
}
