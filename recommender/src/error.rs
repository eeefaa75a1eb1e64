//! Error kinds that cross component boundaries.
//!
//! `CatalogError` is startup-fatal. `RecommendError` is what the presentation
//! layer sees per request. Metadata lookup failures live in
//! [`crate::enrichment::EnrichmentError`] and never leave the cache.

use std::path::PathBuf;

use thiserror::Error;

/// The catalog could not be read or is structurally inconsistent.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("catalog has no items")]
    Empty,

    #[error("similarity matrix has {rows} rows but the catalog has {items} items")]
    RowCountMismatch { rows: usize, items: usize },

    #[error("similarity row {row} has {len} columns, expected {items}")]
    RowLengthMismatch { row: usize, len: usize, items: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecommendError {
    #[error("no catalog item titled '{title}'")]
    NotFound { title: String },

    #[error("selection index {index} is out of range for a catalog of {len} items")]
    InvalidSelection { index: usize, len: usize },
}
