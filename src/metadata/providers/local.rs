//! Provider backed by a directory of JSON records.
//!
//! Records live at `<dir>/<IDENTIFIER>.json`. The identifier is tried as
//! given, upper-cased, then lower-cased.

use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use idforged_common::Metadata;
use idforged_parser::Identifier;
use tracing::debug;

use super::page::{JsonPage, PageRecord};
use crate::config::Config;
use crate::metadata::provider::{Lookup, Provider};

pub struct LocalProvider {
    record: PageRecord,
}

impl LocalProvider {
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

fn candidates(dir: &Path, identifier: &Identifier) -> Vec<PathBuf> {
    let raw = identifier.as_str();
    let mut names: Vec<String> = Vec::with_capacity(3);
    for name in [raw.to_string(), raw.to_uppercase(), raw.to_lowercase()] {
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
        .into_iter()
        .map(|name| dir.join(format!("{name}.json")))
        .collect()
}

#[async_trait]
impl Provider for LocalProvider {
    async fn connect(identifier: &Identifier, config: &Config) -> anyhow::Result<Self> {
        let dir = &config.providers.local.dir;

        for path in candidates(dir, identifier) {
            if !path.is_file() {
                continue;
            }
            let text = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read record: {:?}", path))?;
            let page = JsonPage::parse(path.display().to_string(), &text)?;
            debug!(path = %path.display(), "Loaded local record");
            return Ok(Self {
                record: PageRecord::found(page),
            });
        }

        Ok(Self {
            record: PageRecord::not_found(),
        })
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
