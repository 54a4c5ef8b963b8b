//! Source fetchers.
//!
//! One strategy per specifier kind turns a classified source into skill
//! content. Url and local sources are recognized but not fetched yet; they
//! fail with [`Error::NotSupported`] rather than doing nothing.

pub mod hosted;
pub mod registry;

pub use hosted::{HostedFetcher, RAW_CONTENT_BASE};
pub use registry::{RegistryFetcher, SEARCH_LIMIT};

use crate::error::{Error, Result};
use crate::source::Specifier;

/// Raw content retrieved for a specifier, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedSkill {
    pub name: String,
    pub content: String,
    /// Canonical registry id for registry sources
    pub registry_id: Option<String>,
    /// Non-fatal notes, such as an ambiguous registry match
    pub warnings: Vec<String>,
}

impl FetchedSkill {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            registry_id: None,
            warnings: Vec::new(),
        }
    }

    pub fn with_registry_id(mut self, id: impl Into<String>) -> Self {
        self.registry_id = Some(id.into());
        self
    }
}

/// Dispatches a specifier to its fetcher.
#[derive(Debug, Clone)]
pub struct Fetcher {
    hosted: HostedFetcher,
    registry: RegistryFetcher,
}

impl Fetcher {
    pub fn new(hosted: HostedFetcher, registry: RegistryFetcher) -> Self {
        Self { hosted, registry }
    }

    pub async fn fetch(&self, spec: &Specifier) -> Result<FetchedSkill> {
        match spec {
            Specifier::Hosted(hosted) => self.hosted.fetch(hosted).await,
            Specifier::Registry { id_or_slug } => self.registry.fetch(id_or_slug).await,
            Specifier::Url { .. } => Err(Error::NotSupported("url")),
            Specifier::Local { .. } => Err(Error::NotSupported("local")),
        }
    }
}
