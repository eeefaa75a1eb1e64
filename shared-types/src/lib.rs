//! Wire types shared between the recommender API and its frontends
//!
//! These types are used by both:
//! - the axum API in the `recommender` crate (native Rust)
//! - any presentation layer consuming the JSON (TypeScript bindings via ts-rs)
//!
//! Serializable with serde for JSON over HTTP

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Base URL used to link an external id to its IMDb title page.
pub const IMDB_TITLE_BASE_URL: &str = "https://www.imdb.com/title";

/// Notice returned alongside an empty recommendation list.
pub const NO_RECOMMENDATIONS_NOTICE: &str =
    "No recommendations found. Please try another title.";

// ============================================================================
// Recommendations
// ============================================================================

/// A single display-ready recommendation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../../bindings/recommender.ts")]
pub struct Recommendation {
    /// Catalog item id (also the metadata service key)
    pub id: i64,
    pub title: String,
    /// Similarity to the selected item; higher is closer
    pub score: f64,
    pub artwork_url: Option<String>,
    pub external_id: Option<String>,
}

impl Recommendation {
    /// IMDb page for this item, when an external id is known.
    pub fn external_url(&self) -> Option<String> {
        self.external_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .map(|id| format!("{IMDB_TITLE_BASE_URL}/{id}/"))
    }
}

/// Recommendation as rendered over HTTP, with the derived IMDb link
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../../bindings/recommender.ts")]
pub struct RecommendationView {
    pub id: i64,
    pub title: String,
    pub score: f64,
    pub artwork_url: Option<String>,
    pub external_id: Option<String>,
    pub external_url: Option<String>,
}

impl From<Recommendation> for RecommendationView {
    fn from(rec: Recommendation) -> Self {
        let external_url = rec.external_url();
        Self {
            id: rec.id,
            title: rec.title,
            score: rec.score,
            artwork_url: rec.artwork_url,
            external_id: rec.external_id,
            external_url,
        }
    }
}

/// GET /recommendations response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../../bindings/recommender.ts")]
pub struct RecommendationsResponse {
    pub selected: String,
    pub recommendations: Vec<RecommendationView>,
    /// Set when nothing enrichable was found for the selection
    pub notice: Option<String>,
}

impl RecommendationsResponse {
    pub fn new(selected: String, recommendations: Vec<Recommendation>) -> Self {
        let notice = recommendations
            .is_empty()
            .then(|| NO_RECOMMENDATIONS_NOTICE.to_string());
        Self {
            selected,
            recommendations: recommendations.into_iter().map(Into::into).collect(),
            notice,
        }
    }
}

// ============================================================================
// Catalog / Health
// ============================================================================

/// GET /titles response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../../bindings/recommender.ts")]
pub struct TitlesResponse {
    pub titles: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, TS)]
#[ts(export, export_to = "../../bindings/recommender.ts")]
pub struct CacheStatsView {
    pub hits: u64,
    pub misses: u64,
    pub entries: u32,
    pub capacity: u32,
}

/// GET /health response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../../bindings/recommender.ts")]
pub struct HealthResponse {
    pub status: String,
    pub items: u32,
    pub cache: CacheStatsView,
}

// ============================================================================
// Errors
// ============================================================================

/// Machine-readable error kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../../bindings/recommender.ts")]
pub enum ApiErrorKind {
    NotFound,
    BadRequest,
    Internal,
}

/// Error body for every non-2xx API response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../../bindings/recommender.ts")]
pub struct ApiError {
    pub error: ApiErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn new(error: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            error,
            message: message.into(),
        }
    }
}
