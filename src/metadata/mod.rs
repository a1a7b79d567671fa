//! Metadata resolution.
//!
//! # Module layout
//!
//! - [`provider`] -- Provider contract and site search capability.
//! - [`registry`] -- Name-indexed provider factories and hooks.
//! - [`queue`] -- Priority worklist of provider names.
//! - [`resolver`] -- Tries providers in order until one is acceptable.
//! - [`validation`] / [`tagging`] -- Acceptance check and filename tags.
//! - [`providers`] -- Bundled `local` and `remote` providers.

pub mod provider;
pub mod providers;
pub mod queue;
pub mod registry;
pub mod resolver;
pub mod tagging;
pub mod validation;

pub use provider::{Lookup, Provider, ProviderFactory, ProviderUnit, SiteSearch};
pub use providers::{builtin_registry, register_builtin_providers};
pub use queue::ProviderQueue;
pub use registry::{ProviderRegistry, RegistryError};
pub use resolver::{MetadataResolver, ResolveError};
