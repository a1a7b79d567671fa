//! Provider registry.
//!
//! Maps lowercase provider names to factories, and each provider name to an
//! ordered list of hooks. Hooks are the independent extraction steps of a
//! provider (basic info, cover, outline, ...); one failing step does not
//! stop the others.
//!
//! The registry is populated once at startup and is read-only afterwards.

use std::collections::HashMap;
use std::sync::Arc;

use idforged_common::Metadata;
use idforged_parser::Identifier;
use thiserror::Error;
use tracing::{debug, warn};

use super::provider::{Lookup, Provider, ProviderFactory, ProviderUnit, TypedFactory};
use crate::config::Config;

/// Errors surfaced by registry lookups.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("unknown provider: {0}")]
    UnknownProvider(String),

    #[error("invalid hook name '{0}', expected '<provider>.<step>'")]
    InvalidHookName(String),

    #[error("provider '{name}' failed: {source}")]
    Provider {
        name: String,
        #[source]
        source: anyhow::Error,
    },
}

type ErasedHook = Arc<dyn Fn(&mut dyn ProviderUnit) -> anyhow::Result<()> + Send + Sync>;

#[derive(Clone)]
struct Hook {
    step: String,
    run: ErasedHook,
}

/// Name-indexed provider factories and their hooks.
#[derive(Default, Clone)]
pub struct ProviderRegistry {
    factories: HashMap<String, Arc<dyn ProviderFactory>>,
    hooks: HashMap<String, Vec<Hook>>,
}

impl ProviderRegistry {
    /// Create an empty registry with no providers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register provider type `P` under `name`. Re-registering a name
    /// replaces the previous factory.
    pub fn register<P: Provider>(&mut self, name: &str) {
        self.register_factory(name, Arc::new(TypedFactory::<P>::new()));
    }

    /// Register a factory under `name`. Re-registering a name replaces the
    /// previous factory.
    pub fn register_factory(&mut self, name: &str, factory: Arc<dyn ProviderFactory>) {
        let key = name.to_lowercase();
        if self.factories.insert(key.clone(), factory).is_some() {
            debug!(provider = %key, "Replacing registered provider");
        }
    }

    /// Register a hook for provider type `P`.
    ///
    /// `qualified_name` is `"<provider>.<step>"`. Hooks of one provider run
    /// in registration order. A hook only runs against units of type `P`;
    /// against any other type it fails and is logged.
    pub fn register_hook<P: Provider>(
        &mut self,
        qualified_name: &str,
        hook: fn(&mut P) -> anyhow::Result<()>,
    ) -> Result<(), RegistryError> {
        let (provider, step) = qualified_name
            .split_once('.')
            .filter(|(provider, step)| !provider.is_empty() && !step.is_empty())
            .ok_or_else(|| RegistryError::InvalidHookName(qualified_name.to_string()))?;

        let qualified = qualified_name.to_string();
        let run: ErasedHook = Arc::new(move |unit: &mut dyn ProviderUnit| {
            let provider = unit.as_any_mut().downcast_mut::<P>().ok_or_else(|| {
                anyhow::anyhow!("hook '{}' does not match the registered provider type", qualified)
            })?;
            hook(provider)
        });

        self.hooks
            .entry(provider.to_lowercase())
            .or_default()
            .push(Hook {
                step: step.to_string(),
                run,
            });
        Ok(())
    }

    /// True when a provider is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(&name.to_lowercase())
    }

    /// Registered provider names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }

    /// Hook step names for `name`, in run order.
    pub fn hook_names(&self, name: &str) -> Vec<String> {
        self.hooks
            .get(&name.to_lowercase())
            .map(|hooks| hooks.iter().map(|h| h.step.clone()).collect())
            .unwrap_or_default()
    }

    /// Construct the provider registered under `name`.
    pub async fn resolve(
        &self,
        name: &str,
        identifier: &Identifier,
        config: &Config,
    ) -> Result<Box<dyn ProviderUnit>, RegistryError> {
        let key = name.to_lowercase();
        let factory = self
            .factories
            .get(&key)
            .ok_or_else(|| RegistryError::UnknownProvider(name.to_string()))?;

        factory
            .build(identifier, config)
            .await
            .map_err(|source| RegistryError::Provider { name: key, source })
    }

    /// Construct the provider, run its hooks and return the filled record.
    ///
    /// Returns `Ok(None)` when the provider found no page; hooks are not run
    /// in that case.
    pub async fn get(
        &self,
        name: &str,
        identifier: &Identifier,
        config: &Config,
    ) -> Result<Option<Metadata>, RegistryError> {
        let mut unit = self.resolve(name, identifier, config).await?;

        if unit.lookup() == Lookup::NotFound {
            debug!(provider = %name, identifier = %identifier, "No page found");
            return Ok(None);
        }

        let key = name.to_lowercase();
        for hook in self.hooks.get(&key).into_iter().flatten() {
            if let Err(e) = (hook.run)(unit.as_mut()) {
                warn!(
                    provider = %key,
                    hook = %hook.step,
                    identifier = %identifier,
                    error = %e,
                    "Hook failed"
                );
            }
        }

        Ok(Some(unit.into_data()))
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.names())
            .finish()
    }
}
