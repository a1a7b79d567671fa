//! Provider backed by a JSON HTTP source.
//!
//! The provider holds a [`SiteSearch`] that turns an identifier into an item
//! URL: [`DirectSearch`] when only `base_url` is configured, [`IndexSearch`]
//! when `search_url` is. A search miss or an HTTP 404 on the item page means
//! the site has no record; any other failure is a provider error.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use idforged_common::Metadata;
use idforged_parser::Identifier;
use reqwest::StatusCode;
use tracing::debug;

use super::page::{JsonPage, PageRecord};
use super::search::{DirectSearch, IndexSearch};
use crate::config::{Config, RemoteProviderConfig};
use crate::metadata::provider::{Lookup, Provider, SiteSearch};

/// HTTP client paired with the search strategy for one site.
pub struct RemoteSite {
    client: reqwest::Client,
    search: Box<dyn SiteSearch>,
}

impl RemoteSite {
    pub fn from_config(config: &RemoteProviderConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        let search: Box<dyn SiteSearch> = match (&config.search_url, &config.base_url) {
            (Some(search_url), _) => Box::new(IndexSearch::new(client.clone(), search_url)),
            (None, Some(base_url)) => Box::new(DirectSearch::new(base_url)),
            (None, None) => anyhow::bail!("Remote provider has no base_url or search_url"),
        };

        Ok(Self { client, search })
    }

    pub fn new(client: reqwest::Client, search: Box<dyn SiteSearch>) -> Self {
        Self { client, search }
    }

    /// Locate and fetch the item page for `identifier`.
    pub async fn fetch(&self, identifier: &Identifier) -> anyhow::Result<Option<JsonPage>> {
        let Some(url) = self.search.locate(identifier).await? else {
            return Ok(None);
        };

        debug!(url = %url, identifier = %identifier, "Fetching item page");
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Item request failed: {url}"))?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body: serde_json::Value = resp
            .error_for_status()
            .with_context(|| format!("Item request returned error: {url}"))?
            .json()
            .await
            .with_context(|| format!("Failed to parse item page: {url}"))?;

        JsonPage::from_value(url, body).map(Some)
    }
}

pub struct RemoteProvider {
    record: PageRecord,
}

impl RemoteProvider {
    pub fn info(&mut self) -> anyhow::Result<()> {
        self.record.info()
    }

    pub fn cover(&mut self) -> anyhow::Result<()> {
        self.record.cover()
    }

    pub fn outline(&mut self) -> anyhow::Result<()> {
        self.record.outline()
    }
}

#[async_trait]
impl Provider for RemoteProvider {
    async fn connect(identifier: &Identifier, config: &Config) -> anyhow::Result<Self> {
        let site = RemoteSite::from_config(&config.providers.remote)?;
        let record = match site.fetch(identifier).await? {
            Some(page) => PageRecord::found(page),
            None => PageRecord::not_found(),
        };
        Ok(Self { record })
    }

    fn lookup(&self) -> Lookup {
        self.record.lookup()
    }

    fn data(&self) -> &Metadata {
        self.record.data()
    }

    fn data_mut(&mut self) -> &mut Metadata {
        self.record.data_mut()
    }

    fn into_data(self) -> Metadata {
        self.record.into_data()
    }
}
