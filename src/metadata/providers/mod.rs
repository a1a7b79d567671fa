//! Bundled providers.
//!
//! - [`local`] reads JSON records from a directory.
//! - [`remote`] fetches JSON item pages over HTTP.
//!
//! Both expose the same three extraction steps: `info`, `cover`, `outline`.

pub mod local;
pub mod page;
pub mod remote;
pub mod search;

pub use local::LocalProvider;
pub use page::{JsonPage, PageRecord};
pub use remote::{RemoteProvider, RemoteSite};
pub use search::{DirectSearch, IndexSearch};

use super::registry::{ProviderRegistry, RegistryError};

/// Register the bundled providers and their hooks.
pub fn register_builtin_providers(registry: &mut ProviderRegistry) -> Result<(), RegistryError> {
    registry.register::<LocalProvider>("local");
    registry.register_hook::<LocalProvider>("local.info", LocalProvider::info)?;
    registry.register_hook::<LocalProvider>("local.cover", LocalProvider::cover)?;
    registry.register_hook::<LocalProvider>("local.outline", LocalProvider::outline)?;

    registry.register::<RemoteProvider>("remote");
    registry.register_hook::<RemoteProvider>("remote.info", RemoteProvider::info)?;
    registry.register_hook::<RemoteProvider>("remote.cover", RemoteProvider::cover)?;
    registry.register_hook::<RemoteProvider>("remote.outline", RemoteProvider::outline)?;

    Ok(())
}

/// A registry holding the bundled providers.
pub fn builtin_registry() -> Result<ProviderRegistry, RegistryError> {
    let mut registry = ProviderRegistry::new();
    register_builtin_providers(&mut registry)?;
    Ok(registry)
}
