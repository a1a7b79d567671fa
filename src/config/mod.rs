mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    expand_paths(&mut config);
    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./idforged.toml",
        "./config.toml",
        "~/.config/idforged/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}

fn expand_paths(config: &mut Config) {
    let dir = config.providers.local.dir.to_string_lossy().into_owned();
    config.providers.local.dir = shellexpand::tilde(&dir).as_ref().into();

    let failed = config.resource.failed_folder.to_string_lossy().into_owned();
    config.resource.failed_folder = shellexpand::tilde(&failed).as_ref().into();
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.resolver.priority.is_empty() {
        anyhow::bail!("Resolver priority list cannot be empty");
    }

    let mut seen = HashSet::new();
    for name in &config.resolver.priority {
        if name.trim().is_empty() {
            anyhow::bail!("Resolver priority contains an empty provider name");
        }
        if !seen.insert(name.to_lowercase()) {
            anyhow::bail!("Provider '{}' appears more than once in priority", name);
        }
    }

    if config.providers.remote.timeout_secs == 0 {
        anyhow::bail!("Remote provider timeout cannot be 0");
    }

    if seen.contains("local") && !config.providers.local.dir.exists() {
        tracing::warn!(
            "Local metadata directory does not exist: {:?}",
            config.providers.local.dir
        );
    }

    if seen.contains("remote") && !config.providers.remote.is_configured() {
        tracing::warn!("Provider 'remote' is prioritized but has no base_url or search_url");
    }

    Ok(())
}
