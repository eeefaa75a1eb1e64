//! Shared fixtures for recommender integration tests
#![allow(dead_code)]

use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use recommender::catalog::{Catalog, Item};
use recommender::enrichment::{EnrichmentCache, EnrichmentError, EnrichmentRecord, MetadataSource};

/// Metadata source that fails for a fixed set of ids and records every call.
pub struct FakeSource {
    failing: HashSet<i64>,
    calls: Mutex<Vec<i64>>,
}

impl FakeSource {
    pub fn failing(ids: &[i64]) -> Arc<Self> {
        Arc::new(Self {
            failing: ids.iter().copied().collect(),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<i64> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MetadataSource for FakeSource {
    async fn fetch(&self, item_id: i64) -> Result<EnrichmentRecord, EnrichmentError> {
        self.calls.lock().unwrap().push(item_id);
        if self.failing.contains(&item_id) {
            return Err(EnrichmentError::Status(404));
        }
        Ok(EnrichmentRecord {
            artwork_url: Some(format!("https://image.tmdb.org/t/p/w500/{item_id}.jpg")),
            external_id: Some(format!("tt{item_id:07}")),
        })
    }
}

/// Items A..F with ids 0..5; row A = [1.0, 0.9, 0.2, 0.8, 0.5, 0.1].
pub fn letters_catalog() -> Catalog {
    let items = ["A", "B", "C", "D", "E", "F"]
        .iter()
        .enumerate()
        .map(|(i, title)| Item {
            id: i as i64,
            title: title.to_string(),
        })
        .collect();
    let mut rows = vec![vec![0.0f64; 6]; 6];
    rows[0] = vec![1.0, 0.9, 0.2, 0.8, 0.5, 0.1];
    for (i, row) in rows.iter_mut().enumerate().skip(1) {
        row[i] = 1.0;
    }
    Catalog::from_parts(items, rows).unwrap()
}

/// `n` items titled `item-{i}` with id `1000 + i`; every row scores
/// `j` as `1 / (1 + |i - j|)`.
pub fn banded_catalog(n: usize) -> Catalog {
    let items = (0..n)
        .map(|i| Item {
            id: 1000 + i as i64,
            title: format!("item-{i}"),
        })
        .collect();
    let rows = (0..n)
        .map(|i| {
            (0..n)
                .map(|j| 1.0 / (1.0 + (i as f64 - j as f64).abs()))
                .collect()
        })
        .collect();
    Catalog::from_parts(items, rows).unwrap()
}

pub fn cache_over(source: Arc<FakeSource>, capacity: usize) -> Arc<EnrichmentCache> {
    Arc::new(EnrichmentCache::new(
        source,
        NonZeroUsize::new(capacity).unwrap(),
    ))
}
