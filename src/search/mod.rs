//! Web search
//!
//! The search backend sits behind the `WebSearch` trait; results of the most
//! recent search are persisted so they can be shown again later.

pub mod duckduckgo;

use crate::error::LexResult;
use crate::history::{load_json_array, write_json_array};
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use duckduckgo::DuckDuckGo;

/// A single search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub snippet: String,
}

/// Trait for web search backends
#[async_trait]
pub trait WebSearch: Send + Sync {
    /// Every result the backend found for `query`; the caller filters and caps them
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>>;

    /// Get the backend name
    fn name(&self) -> &str;
}

fn is_cjk(ch: char) -> bool {
    ('\u{4e00}'..='\u{9fff}').contains(&ch)
}

/// Drop results whose snippet is written in CJK ideographs and cap the count
pub fn filter_results(results: Vec<SearchResult>, limit: usize) -> Vec<SearchResult> {
    results
        .into_iter()
        .filter(|r| !r.snippet.chars().any(is_cjk))
        .take(limit)
        .collect()
}

/// The persisted result set of the most recent search
#[derive(Debug, Clone)]
pub struct LastSearchStore {
    path: PathBuf,
}

impl LastSearchStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the stored results
    pub fn save(&self, results: &[SearchResult]) -> LexResult<()> {
        write_json_array(&self.path, results)
    }

    /// None when nothing was ever saved (or the file was unreadable)
    pub fn load(&self) -> LexResult<Option<Vec<SearchResult>>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let results: Vec<SearchResult> = load_json_array(&self.path)?;
        if self.path.exists() {
            Ok(Some(results))
        } else {
            Ok(None)
        }
    }
}
