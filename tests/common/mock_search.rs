//! Mock web search for testing

use anyhow::Result;
use async_trait::async_trait;
use lexchat::search::{SearchResult, WebSearch};
use std::sync::{Arc, Mutex};

/// Returns a fixed result set and records every query
#[derive(Debug, Clone, Default)]
pub struct MockSearch {
    pub results: Vec<SearchResult>,
    pub queries: Arc<Mutex<Vec<String>>>,
    pub should_fail: bool,
}

impl MockSearch {
    pub fn with_results(results: Vec<SearchResult>) -> Self {
        Self {
            results,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }
}

pub fn result(title: &str, snippet: &str) -> SearchResult {
    SearchResult {
        title: title.to_string(),
        link: format!("https://example.org/{}", title.to_lowercase().replace(' ', "-")),
        snippet: snippet.to_string(),
    }
}

#[async_trait]
impl WebSearch for MockSearch {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        self.queries.lock().unwrap().push(query.to_string());
        if self.should_fail {
            return Err(anyhow::anyhow!("Mock search failure"));
        }
        Ok(self.results.clone())
    }

    fn name(&self) -> &str {
        "mock"
    }
}
