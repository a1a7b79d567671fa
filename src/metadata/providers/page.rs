//! JSON item pages and the record they fill.

use anyhow::Context;
use idforged_common::Metadata;
use reqwest::Url;
use serde_json::{Map, Value};

use crate::metadata::provider::Lookup;

/// A fetched item page: a JSON object plus where it came from.
#[derive(Debug, Clone)]
pub struct JsonPage {
    location: String,
    body: Map<String, Value>,
}

impl JsonPage {
    /// Parse `text` as a JSON object.
    pub fn parse(location: impl Into<String>, text: &str) -> anyhow::Result<Self> {
        let location = location.into();
        let value: Value = serde_json::from_str(text)
            .with_context(|| format!("Invalid JSON item page: {location}"))?;
        Self::from_value(location, value)
    }

    pub fn from_value(location: impl Into<String>, value: Value) -> anyhow::Result<Self> {
        let location = location.into();
        match value {
            Value::Object(body) => Ok(Self { location, body }),
            other => anyhow::bail!(
                "Item page {location} is not a JSON object (found {})",
                kind(&other)
            ),
        }
    }

    /// URL or file path the page was read from.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// A scalar field as text. Missing, null or nested values read as `""`.
    pub fn text(&self, key: &str) -> String {
        match self.body.get(key) {
            Some(Value::String(s)) => s.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => String::new(),
        }
    }

    /// A list field. Accepts arrays of strings, arrays of `{"name": ..}`
    /// objects, or a single comma-separated string.
    pub fn list(&self, key: &str) -> Vec<String> {
        let items: Vec<String> = match self.body.get(key) {
            Some(Value::Array(values)) => values.iter().filter_map(list_item).collect(),
            Some(Value::String(s)) => s.split(',').map(str::to_string).collect(),
            _ => Vec::new(),
        };

        items
            .into_iter()
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect()
    }

    /// `key` as an absolute URL, resolving relative references against the
    /// page location when the page came from the web.
    pub fn url(&self, key: &str) -> String {
        let raw = self.text(key);
        if raw.is_empty() {
            return raw;
        }
        match Url::parse(&self.location).and_then(|base| base.join(&raw)) {
            Ok(url) => url.to_string(),
            Err(_) => raw,
        }
    }
}

fn list_item(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(obj) => obj.get("name").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Page-backed provider state shared by the bundled providers.
///
/// The extraction steps below are what the providers register as hooks.
#[derive(Debug, Default)]
pub struct PageRecord {
    page: Option<JsonPage>,
    data: Metadata,
}

impl PageRecord {
    pub fn found(page: JsonPage) -> Self {
        Self {
            page: Some(page),
            data: Metadata::new(),
        }
    }

    pub fn not_found() -> Self {
        Self::default()
    }

    pub fn lookup(&self) -> Lookup {
        if self.page.is_some() {
            Lookup::Found
        } else {
            Lookup::NotFound
        }
    }

    pub fn data(&self) -> &Metadata {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut Metadata {
        &mut self.data
    }

    pub fn into_data(self) -> Metadata {
        self.data
    }

    fn page(&self) -> anyhow::Result<&JsonPage> {
        self.page.as_ref().context("No page loaded")
    }

    /// Basic fields: title, number, dates, credits, tags.
    pub fn info(&mut self) -> anyhow::Result<()> {
        let page = self.page()?.clone();
        let data = &mut self.data;

        data.title = page.text("title");
        data.number = page.text("number");
        data.release = page.text("release");
        data.runtime = page.text("runtime");
        data.director = page.text("director");
        data.studio = page.text("studio");
        data.publisher = page.text("publisher");
        data.series = page.text("series");
        data.cid = page.text("cid");
        data.tags = page.list("tags");
        data.actor = page.list("actor");
        Ok(())
    }

    pub fn cover(&mut self) -> anyhow::Result<()> {
        let cover = self.page()?.url("cover");
        self.data.cover = cover;
        Ok(())
    }

    pub fn outline(&mut self) -> anyhow::Result<()> {
        let outline = self.page()?.text("outline");
        self.data.outline = outline;
        Ok(())
    }
}
