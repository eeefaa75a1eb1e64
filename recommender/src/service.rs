//! The entry point a presentation layer depends on.

use std::sync::Arc;

use shared_types::Recommendation;
use tracing::{error, info};

use crate::assembler::{self, AssembleOptions};
use crate::catalog::Catalog;
use crate::enrichment::EnrichmentCache;
use crate::error::RecommendError;

#[derive(Clone)]
pub struct RecommendationService {
    catalog: Arc<Catalog>,
    cache: Arc<EnrichmentCache>,
    options: AssembleOptions,
}

impl RecommendationService {
    pub fn new(catalog: Arc<Catalog>, cache: Arc<EnrichmentCache>) -> Self {
        Self {
            catalog,
            cache,
            options: AssembleOptions::default(),
        }
    }

    pub fn with_options(mut self, options: AssembleOptions) -> Self {
        self.options = options;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cache(&self) -> &EnrichmentCache {
        &self.cache
    }

    pub async fn get_recommendations(
        &self,
        selected_title: &str,
    ) -> Result<Vec<Recommendation>, RecommendError> {
        let result =
            assembler::assemble(selected_title, &self.catalog, &self.cache, self.options).await;
        match &result {
            Ok(recs) => info!(
                selection = selected_title,
                count = recs.len(),
                "recommendations served"
            ),
            Err(e @ RecommendError::NotFound { .. }) => {
                info!(selection = selected_title, error = %e, "unknown selection")
            }
            Err(e @ RecommendError::InvalidSelection { .. }) => {
                error!(selection = selected_title, error = %e, "catalog index inconsistency")
            }
        }
        result
    }
}
