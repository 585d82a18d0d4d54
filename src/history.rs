//! Action history
//!
//! Append-only JSON log of completed actions, capped to the most recent
//! entries and rewritten wholesale on every write.

use crate::error::LexResult;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Number of entries shown by the "history" command
pub const RECENT_SHOWN: usize = 8;

/// What happened, tagged by `type` in the JSON file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Action {
    Command {
        cmd: String,
        mode: String,
    },
    Search {
        query: String,
    },
    Draw {
        shape: String,
        color: String,
        size: u32,
        speed: u32,
    },
    Code {
        lang: String,
        kind: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        file: Option<String>,
    },
    Story {
        words: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub action: Action,
    pub time: String,
}

impl HistoryEntry {
    pub fn now(action: Action) -> Self {
        Self {
            action,
            time: now_str(),
        }
    }
}

pub fn now_str() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Read a JSON array file; a corrupt file is moved aside and treated as empty
pub(crate) fn load_json_array<T: serde::de::DeserializeOwned>(path: &Path) -> LexResult<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(path)?;
    match serde_json::from_str(&content) {
        Ok(items) => Ok(items),
        Err(e) => {
            warn!("⚠️ {} is unreadable, starting empty: {}", path.display(), e);
            let backup = path.with_extension("json.corrupt");
            if let Err(e) = std::fs::rename(path, &backup) {
                warn!("Could not move corrupt file aside: {}", e);
            }
            Ok(Vec::new())
        }
    }
}

pub(crate) fn write_json_array<T: Serialize>(path: &Path, items: &[T]) -> LexResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(items)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Bounded history log backed by a JSON file
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
    limit: usize,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>, limit: usize) -> Self {
        Self {
            path: path.into(),
            limit: limit.max(1),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> LexResult<Vec<HistoryEntry>> {
        load_json_array(&self.path)
    }

    /// Append an entry, dropping the oldest beyond the limit
    pub fn append(&self, entry: HistoryEntry) -> LexResult<()> {
        let mut entries = self.load()?;
        entries.push(entry);
        if entries.len() > self.limit {
            let excess = entries.len() - self.limit;
            entries.drain(..excess);
        }
        write_json_array(&self.path, &entries)?;
        debug!("History now holds {} entries", entries.len());
        Ok(())
    }

    /// Record an action now; failures are logged, never surfaced
    pub fn record(&self, action: Action) {
        if let Err(e) = self.append(HistoryEntry::now(action)) {
            warn!("save_history error: {}", e);
        }
    }

    /// Total entry count and the most recent `n`
    pub fn recent(&self, n: usize) -> LexResult<(usize, Vec<HistoryEntry>)> {
        let entries = self.load()?;
        let total = entries.len();
        let start = total.saturating_sub(n);
        Ok((total, entries[start..].to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(i: usize) -> Action {
        Action::Command {
            cmd: format!("cmd {}", i),
            mode: "text".to_string(),
        }
    }

    #[test]
    fn test_entry_json_shape() {
        let entry = HistoryEntry {
            action: Action::Search {
                query: "rust".to_string(),
            },
            time: "2024-01-01 10:00:00".to_string(),
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["type"], "search");
        assert_eq!(value["query"], "rust");
        assert_eq!(value["time"], "2024-01-01 10:00:00");

        let restored: HistoryEntry = serde_json::from_value(value).unwrap();
        assert_eq!(restored, entry);
    }

    #[test]
    fn test_code_entry_omits_missing_file() {
        let entry = HistoryEntry::now(Action::Code {
            lang: "python".into(),
            kind: "loop".into(),
            file: None,
        });
        let value = serde_json::to_value(&entry).unwrap();
        assert!(value.get("file").is_none());
    }

    #[test]
    fn test_history_is_capped() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("history.json"), 300);

        for i in 0..310 {
            store.record(command(i));
        }

        let entries = store.load().unwrap();
        assert_eq!(entries.len(), 300);
        // Oldest dropped first
        assert_eq!(entries[0].action, command(10));
        assert_eq!(entries[299].action, command(309));
    }

    #[test]
    fn test_recent() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("history.json"), 50);
        for i in 0..12 {
            store.record(command(i));
        }

        let (total, recent) = store.recent(RECENT_SHOWN).unwrap();
        assert_eq!(total, 12);
        assert_eq!(recent.len(), 8);
        assert_eq!(recent[0].action, command(4));
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("nope.json"), 10);
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_file_is_moved_aside() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, "[{ broken").unwrap();

        let store = HistoryStore::new(&path, 10);
        assert!(store.load().unwrap().is_empty());
        assert!(dir.path().join("history.json.corrupt").exists());

        store.record(command(1));
        assert_eq!(store.load().unwrap().len(), 1);
    }
}
