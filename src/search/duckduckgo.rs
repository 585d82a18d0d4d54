//! DuckDuckGo Instant Answer backend
//!
//! Uses the keyless JSON API. The abstract (when present) becomes the first
//! result, followed by related topics, flattening topic groups.

use super::{SearchResult, WebSearch};
use crate::error::LexError;
use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

const API_URL: &str = "https://api.duckduckgo.com/";

#[derive(Debug, Default, Deserialize)]
pub struct InstantAnswer {
    #[serde(rename = "Heading", default)]
    pub heading: String,
    #[serde(rename = "AbstractText", default)]
    pub abstract_text: String,
    #[serde(rename = "AbstractURL", default)]
    pub abstract_url: String,
    #[serde(rename = "RelatedTopics", default)]
    pub related_topics: Vec<RelatedTopic>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RelatedTopic {
    Group {
        #[serde(rename = "Name")]
        name: String,
        #[serde(rename = "Topics")]
        topics: Vec<RelatedTopic>,
    },
    Topic {
        #[serde(rename = "Text", default)]
        text: String,
        #[serde(rename = "FirstURL", default)]
        first_url: String,
    },
}

fn collect_topics(topics: Vec<RelatedTopic>, out: &mut Vec<SearchResult>) {
    for topic in topics {
        match topic {
            RelatedTopic::Group { name, topics } => {
                debug!("Flattening topic group '{}'", name);
                collect_topics(topics, out);
            }
            RelatedTopic::Topic { text, first_url } => {
                if text.is_empty() {
                    continue;
                }
                let title = text
                    .split(" - ")
                    .next()
                    .unwrap_or(text.as_str())
                    .to_string();
                out.push(SearchResult {
                    title,
                    link: first_url,
                    snippet: text,
                });
            }
        }
    }
}

/// Convert an API answer into search results
pub fn results_from_answer(answer: InstantAnswer) -> Vec<SearchResult> {
    let mut results = Vec::new();

    if !answer.abstract_text.is_empty() {
        results.push(SearchResult {
            title: answer.heading,
            link: answer.abstract_url,
            snippet: answer.abstract_text,
        });
    }
    collect_topics(answer.related_topics, &mut results);
    results
}

/// DuckDuckGo search client
pub struct DuckDuckGo {
    client: reqwest::Client,
}

impl DuckDuckGo {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .user_agent(concat!("lexchat/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    fn url(query: &str) -> String {
        format!(
            "{}?q={}&format=json&no_html=1&skip_disambig=1",
            API_URL,
            urlencoding::encode(query)
        )
    }
}

#[async_trait]
impl WebSearch for DuckDuckGo {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        info!("🔍 Searching DuckDuckGo for '{}'", query);
        let response = self.client.get(Self::url(query)).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LexError::Search(format!("HTTP {}", status)).into());
        }

        let answer: InstantAnswer = response.json().await.map_err(LexError::from)?;
        let results = results_from_answer(answer);
        debug!("DuckDuckGo returned {} results", results.len());
        Ok(results)
    }

    fn name(&self) -> &str {
        "duckduckgo"
    }
}
