//! Result assembly: ranking + enrichment into display-ready recommendations.

use shared_types::Recommendation;
use tracing::debug;

use crate::catalog::Catalog;
use crate::enrichment::EnrichmentCache;
use crate::error::RecommendError;
use crate::ranking;

pub const DEFAULT_RECOMMENDATION_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssembleOptions {
    /// Maximum number of recommendations returned.
    pub k: usize,
    /// How many ranked candidates may be looked up before giving up.
    /// `None` walks the whole ranking.
    pub max_candidates: Option<usize>,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            k: DEFAULT_RECOMMENDATION_COUNT,
            max_candidates: None,
        }
    }
}

/// Up to `k` most similar items to `selection_title` that have artwork.
///
/// An unknown title fails before any metadata lookup. An empty result is
/// not an error: it means nothing in range could be enriched.
pub async fn assemble(
    selection_title: &str,
    catalog: &Catalog,
    cache: &EnrichmentCache,
    options: AssembleOptions,
) -> Result<Vec<Recommendation>, RecommendError> {
    let selection = catalog.find_by_title(selection_title)?;
    let ranking = ranking::rank(selection, catalog)?;
    let scores = catalog
        .similarity_row(selection)
        .ok_or(RecommendError::InvalidSelection {
            index: selection,
            len: catalog.len(),
        })?;

    let budget = options.max_candidates.unwrap_or(ranking.len());
    let mut results = Vec::with_capacity(options.k.min(ranking.len()));
    let mut examined = 0;

    for index in ranking.into_iter().take(budget) {
        if results.len() >= options.k {
            break;
        }
        examined += 1;

        let item = catalog.item(index).ok_or(RecommendError::InvalidSelection {
            index,
            len: catalog.len(),
        })?;
        let record = cache.get(item.id).await;
        if !record.has_artwork() {
            debug!(item_id = item.id, title = %item.title, "skipping candidate without artwork");
            continue;
        }

        results.push(Recommendation {
            id: item.id,
            title: item.title.clone(),
            score: scores[index],
            artwork_url: record.artwork_url,
            external_id: record.external_id,
        });
    }

    debug!(
        selection = selection_title,
        examined,
        returned = results.len(),
        "assembled recommendations"
    );
    Ok(results)
}
