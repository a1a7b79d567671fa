//! Provider contract.
//!
//! A provider is constructed once per lookup from an identifier and the
//! loaded configuration. Construction performs the fetch; the provider then
//! reports whether it found a usable page, and registered hooks fill its
//! [`Metadata`] in place.
//!
//! [`Provider`] is the typed trait implementors write against.
//! [`ProviderUnit`] is its object-safe face, blanket-implemented for every
//! provider, which is what the registry stores and hooks are dispatched on.

use std::any::Any;
use std::marker::PhantomData;

use async_trait::async_trait;
use idforged_common::Metadata;
use idforged_parser::Identifier;

use crate::config::Config;

/// Whether construction found a usable page for the identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Found,
    NotFound,
}

/// A metadata source.
#[async_trait]
pub trait Provider: Send + Sized + 'static {
    /// Fetch whatever the provider needs for `identifier`.
    ///
    /// A missing page is not an error: return a provider whose
    /// [`lookup`](Self::lookup) reports [`Lookup::NotFound`]. Errors are
    /// reserved for failures such as an unreachable host or a malformed
    /// response.
    async fn connect(identifier: &Identifier, config: &Config) -> anyhow::Result<Self>;

    fn lookup(&self) -> Lookup;

    fn data(&self) -> &Metadata;

    fn data_mut(&mut self) -> &mut Metadata;

    fn into_data(self) -> Metadata;
}

/// Object-safe view of a constructed provider.
pub trait ProviderUnit: Send {
    fn lookup(&self) -> Lookup;

    fn data(&self) -> &Metadata;

    fn into_data(self: Box<Self>) -> Metadata;

    /// Downcast hook for typed hooks.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<P: Provider> ProviderUnit for P {
    fn lookup(&self) -> Lookup {
        Provider::lookup(self)
    }

    fn data(&self) -> &Metadata {
        Provider::data(self)
    }

    fn into_data(self: Box<Self>) -> Metadata {
        Provider::into_data(*self)
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Builds provider units by name.
#[async_trait]
pub trait ProviderFactory: Send + Sync {
    async fn build(
        &self,
        identifier: &Identifier,
        config: &Config,
    ) -> anyhow::Result<Box<dyn ProviderUnit>>;
}

/// Factory for a concrete [`Provider`] type.
pub(crate) struct TypedFactory<P>(PhantomData<fn() -> P>);

impl<P> TypedFactory<P> {
    pub(crate) fn new() -> Self {
        Self(PhantomData)
    }
}

#[async_trait]
impl<P: Provider> ProviderFactory for TypedFactory<P> {
    async fn build(
        &self,
        identifier: &Identifier,
        config: &Config,
    ) -> anyhow::Result<Box<dyn ProviderUnit>> {
        let provider = P::connect(identifier, config).await?;
        Ok(Box::new(provider))
    }
}

/// Locates the page for an identifier on a site.
///
/// Providers hold a search strategy rather than implementing one, so the
/// same provider can be pointed at a direct item URL or at a search index.
#[async_trait]
pub trait SiteSearch: Send + Sync {
    /// The URL of the item page, or `None` when the site has no match.
    async fn locate(&self, identifier: &Identifier) -> anyhow::Result<Option<String>>;
}
