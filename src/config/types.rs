use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub resolver: ResolverConfig,

    #[serde(default)]
    pub resource: ResourceConfig,

    #[serde(default)]
    pub providers: ProvidersConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Provider names in trust order; the first acceptable result wins
    #[serde(default = "default_priority")]
    pub priority: Vec<String>,
}

fn default_priority() -> Vec<String> {
    vec!["local".to_string(), "remote".to_string()]
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            priority: default_priority(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResourceConfig {
    /// Where unresolved files go. Relative paths are taken against the scan root.
    #[serde(default = "default_failed_folder")]
    pub failed_folder: PathBuf,

    /// Move unresolved files into `failed_folder` after a scan
    #[serde(default)]
    pub failed_move: bool,

    /// Video extensions to pick up, with or without the leading dot
    #[serde(default = "default_file_type")]
    pub file_type: Vec<String>,

    /// Folder names under the scan root that are never descended into
    #[serde(default = "default_exclude_folders")]
    pub exclude_folders: Vec<String>,

    /// Filename substrings marking a leaked release
    #[serde(default)]
    pub leaked_suffix: Vec<String>,

    /// Filename substrings marking embedded subtitles
    #[serde(default)]
    pub sub_suffix: Vec<String>,

    /// Prefix of a multi-part marker, e.g. `-cd` for `-cd1`, `-cd2`
    #[serde(default)]
    pub part_suffix: String,

    /// Extra filename tokens stripped before identifier extraction
    #[serde(default)]
    pub noise: Vec<String>,
}

fn default_failed_folder() -> PathBuf {
    PathBuf::from("failed")
}

fn default_file_type() -> Vec<String> {
    idforged_common::paths::video_extensions()
}

fn default_exclude_folders() -> Vec<String> {
    ["failed", "output", "escape"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            failed_folder: default_failed_folder(),
            failed_move: false,
            file_type: default_file_type(),
            exclude_folders: default_exclude_folders(),
            leaked_suffix: Vec::new(),
            sub_suffix: Vec::new(),
            part_suffix: String::new(),
            noise: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub local: LocalProviderConfig,

    #[serde(default)]
    pub remote: RemoteProviderConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LocalProviderConfig {
    /// Directory holding `<IDENTIFIER>.json` records
    #[serde(default = "default_local_dir")]
    pub dir: PathBuf,
}

fn default_local_dir() -> PathBuf {
    PathBuf::from(shellexpand::tilde("~/.local/share/idforged/metadata").as_ref())
}

impl Default for LocalProviderConfig {
    fn default() -> Self {
        Self {
            dir: default_local_dir(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RemoteProviderConfig {
    /// Item endpoint; an identifier is appended as the last path segment
    #[serde(default)]
    pub base_url: Option<String>,

    /// Optional search endpoint queried with `?q=<identifier>`
    #[serde(default)]
    pub search_url: Option<String>,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    10
}

impl RemoteProviderConfig {
    /// True when at least one endpoint is configured.
    pub fn is_configured(&self) -> bool {
        self.base_url.is_some() || self.search_url.is_some()
    }
}
