//! Enrichment: artwork and external ids fetched from a metadata service.
//!
//! [`EnrichmentCache`] is the only thing the rest of the crate talks to. It
//! turns every [`EnrichmentError`] into [`EnrichmentRecord::empty`], so a
//! failing metadata service shows up as "no artwork", never as an error.

mod cache;
mod tmdb;

pub use cache::{CacheStats, EnrichmentCache, DEFAULT_CACHE_CAPACITY, DEFAULT_LOOKUP_TIMEOUT};
pub use tmdb::{TmdbClient, TmdbConfig};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Display metadata for one catalog item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentRecord {
    pub artwork_url: Option<String>,
    pub external_id: Option<String>,
}

impl EnrichmentRecord {
    /// The record stored for failed or absent lookups.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.artwork_url.is_none() && self.external_id.is_none()
    }

    pub fn has_artwork(&self) -> bool {
        self.artwork_url.as_deref().is_some_and(|url| !url.is_empty())
    }
}

/// A single failed metadata lookup.
#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("metadata service API key is not configured")]
    MissingApiKey,

    #[error("metadata lookup timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("metadata request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("metadata service returned HTTP {0}")]
    Status(u16),

    #[error("malformed metadata response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Remote lookup keyed by catalog item id.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    async fn fetch(&self, item_id: i64) -> Result<EnrichmentRecord, EnrichmentError>;
}
