//! Site search strategies for the remote provider.

use anyhow::Context;
use async_trait::async_trait;
use idforged_parser::{compact, Identifier};
use reqwest::Url;
use serde::Deserialize;
use tracing::debug;

use crate::metadata::provider::SiteSearch;

/// The item page lives at `{base_url}/{identifier}`, with the identifier
/// percent-encoded as a single path segment.
#[derive(Debug, Clone)]
pub struct DirectSearch {
    base_url: String,
}

impl DirectSearch {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl SiteSearch for DirectSearch {
    async fn locate(&self, identifier: &Identifier) -> anyhow::Result<Option<String>> {
        let mut url = Url::parse(&self.base_url)
            .with_context(|| format!("Invalid base URL: {}", self.base_url))?;
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("Base URL cannot hold a path: {}", self.base_url))?
            .pop_if_empty()
            .push(identifier.as_str());
        Ok(Some(url.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct IndexEntry {
    #[serde(default)]
    number: String,
    url: String,
}

/// Queries a search endpoint returning `[{"number", "url"}, ...]` and picks
/// the first entry whose number starts with the identifier, comparing only
/// letters and digits, case-insensitively.
#[derive(Debug, Clone)]
pub struct IndexSearch {
    client: reqwest::Client,
    search_url: String,
}

impl IndexSearch {
    pub fn new(client: reqwest::Client, search_url: impl Into<String>) -> Self {
        Self {
            client,
            search_url: search_url.into(),
        }
    }
}

#[async_trait]
impl SiteSearch for IndexSearch {
    async fn locate(&self, identifier: &Identifier) -> anyhow::Result<Option<String>> {
        let entries: Vec<IndexEntry> = self
            .client
            .get(&self.search_url)
            .query(&[("q", identifier.as_str())])
            .send()
            .await
            .with_context(|| format!("Search request failed: {}", self.search_url))?
            .error_for_status()
            .with_context(|| format!("Search returned error: {}", self.search_url))?
            .json()
            .await
            .context("Failed to parse search response")?;

        let wanted = identifier.compact();
        let Some(entry) = entries
            .into_iter()
            .find(|entry| compact(&entry.number).starts_with(&wanted))
        else {
            debug!(identifier = %identifier, "No search result matched");
            return Ok(None);
        };

        let base = Url::parse(&self.search_url)
            .with_context(|| format!("Invalid search URL: {}", self.search_url))?;
        let url = base
            .join(&entry.url)
            .with_context(|| format!("Invalid result URL: {}", entry.url))?;
        Ok(Some(url.to_string()))
    }
}
