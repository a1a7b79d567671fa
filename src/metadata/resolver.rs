//! Priority-ordered, failure-tolerant metadata resolution.
//!
//! Providers are consulted one at a time in configured order. The first
//! acceptable record is tagged from the filename and returned; later
//! providers are never consulted. A provider that fails or returns an
//! unusable record is logged and skipped.

use std::path::Path;
use std::sync::Arc;

use idforged_common::Metadata;
use idforged_parser::Identifier;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::queue::ProviderQueue;
use super::registry::{ProviderRegistry, RegistryError};
use super::{tagging, validation};
use crate::config::Config;

#[derive(Debug, Error)]
pub enum ResolveError {
    /// A prioritized name has no registered provider.
    #[error("unknown provider in priority list: {0}")]
    UnknownProvider(String),
}

/// Resolves identifiers against the registered providers.
#[derive(Debug, Clone)]
pub struct MetadataResolver {
    registry: Arc<ProviderRegistry>,
}

impl MetadataResolver {
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Prioritized names the registry does not know, in configured order.
    pub fn check_priority(&self, config: &Config) -> Vec<String> {
        config
            .resolver
            .priority
            .iter()
            .filter(|name| !self.registry.contains(name))
            .cloned()
            .collect()
    }

    /// Resolve `identifier` for `file`.
    ///
    /// Returns `Ok(None)` when every provider was tried without an
    /// acceptable record.
    pub async fn resolve(
        &self,
        file: &Path,
        identifier: &Identifier,
        config: &Config,
    ) -> Result<Option<Metadata>, ResolveError> {
        let queue = ProviderQueue::build_for(identifier, &config.resolver.priority);

        for name in queue {
            match self.registry.get(&name, identifier, config).await {
                Ok(Some(mut data)) => {
                    if let Some(reason) = validation::rejection(&data) {
                        debug!(provider = %name, identifier = %identifier, reason, "Rejected record");
                        continue;
                    }

                    tagging::tag_from_filename(&mut data, file, &config.resource);
                    info!(provider = %name, identifier = %identifier, "Resolved metadata");
                    return Ok(Some(data));
                }
                Ok(None) => {
                    debug!(provider = %name, identifier = %identifier, "No record");
                }
                Err(RegistryError::UnknownProvider(name)) => {
                    return Err(ResolveError::UnknownProvider(name));
                }
                Err(e) => {
                    warn!(provider = %name, identifier = %identifier, error = %e, "Provider failed");
                }
            }
        }

        debug!(identifier = %identifier, "All providers exhausted");
        Ok(None)
    }
}
