//! Catalog store: the fixed item list plus its precomputed similarity matrix.
//!
//! Loaded once at startup from two JSON artifacts and shared read-only
//! (`Arc<Catalog>`) for the lifetime of the process.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{CatalogError, RecommendError};

/// A recommendable item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Metadata service key.
    #[serde(alias = "movie_id")]
    pub id: i64,
    pub title: String,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<Item>,
    /// items.len() rows of items.len() scores each
    similarity: Vec<Vec<f64>>,
}

impl Catalog {
    /// Read the item list and the similarity matrix as one unit.
    ///
    /// Nothing is returned unless both files parse and their dimensions agree.
    pub fn load(
        items_path: impl AsRef<Path>,
        similarity_path: impl AsRef<Path>,
    ) -> Result<Self, CatalogError> {
        let items: Vec<Item> = read_json(items_path.as_ref())?;
        let similarity: Vec<Vec<f64>> = read_json(similarity_path.as_ref())?;
        let catalog = Self::from_parts(items, similarity)?;
        info!(
            items = catalog.len(),
            items_path = %items_path.as_ref().display(),
            similarity_path = %similarity_path.as_ref().display(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    pub fn from_parts(items: Vec<Item>, similarity: Vec<Vec<f64>>) -> Result<Self, CatalogError> {
        if items.is_empty() {
            return Err(CatalogError::Empty);
        }
        if similarity.len() != items.len() {
            return Err(CatalogError::RowCountMismatch {
                rows: similarity.len(),
                items: items.len(),
            });
        }
        if let Some((row, scores)) = similarity
            .iter()
            .enumerate()
            .find(|(_, scores)| scores.len() != items.len())
        {
            return Err(CatalogError::RowLengthMismatch {
                row,
                len: scores.len(),
                items: items.len(),
            });
        }
        Ok(Self { items, similarity })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn similarity_row(&self, index: usize) -> Option<&[f64]> {
        self.similarity.get(index).map(Vec::as_slice)
    }

    /// Index of the first item whose title matches exactly.
    pub fn find_by_title(&self, title: &str) -> Result<usize, RecommendError> {
        self.items
            .iter()
            .position(|item| item.title == title)
            .ok_or_else(|| RecommendError::NotFound {
                title: title.to_string(),
            })
    }

    /// All titles in lexical order, for populating a selection list.
    pub fn titles_sorted(&self) -> Vec<&str> {
        let mut titles: Vec<&str> = self.items.iter().map(|item| item.title.as_str()).collect();
        titles.sort_unstable();
        titles
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CatalogError> {
    let bytes = std::fs::read(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
