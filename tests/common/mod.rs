//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A library folder, a record folder and a config file pointing at both.
pub struct TestHarness {
    pub library: TempDir,
    pub records: TempDir,
    config_dir: TempDir,
}

impl TestHarness {
    pub fn new() -> Self {
        Self {
            library: TempDir::new().unwrap(),
            records: TempDir::new().unwrap(),
            config_dir: TempDir::new().unwrap(),
        }
    }

    /// Write a JSON record for `identifier` into the record folder.
    pub fn record(&self, identifier: &str, json: serde_json::Value) -> &Self {
        fs::write(
            self.records.path().join(format!("{identifier}.json")),
            serde_json::to_vec_pretty(&json).unwrap(),
        )
        .unwrap();
        self
    }

    /// Create an empty file in the library folder.
    pub fn video(&self, name: &str) -> PathBuf {
        let path = self.library.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, b"").unwrap();
        path
    }

    /// Write a config file. `extra` is appended verbatim.
    pub fn config(&self, priority: &[&str], extra: &str) -> PathBuf {
        let priority = priority
            .iter()
            .map(|p| format!("\"{p}\""))
            .collect::<Vec<_>>()
            .join(", ");
        let content = format!(
            "[resolver]\npriority = [{priority}]\n\n[providers.local]\ndir = {dir:?}\n\n{extra}\n",
            dir = self.records.path().to_string_lossy(),
        );
        let path = self.config_dir.path().join("idforged.toml");
        fs::write(&path, content).unwrap();
        path
    }

    pub fn library_path(&self) -> &Path {
        self.library.path()
    }
}
