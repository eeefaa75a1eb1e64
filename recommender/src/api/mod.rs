//! HTTP API consumed by the presentation layer.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use shared_types::{
    ApiError, ApiErrorKind, CacheStatsView, HealthResponse, RecommendationsResponse,
    TitlesResponse,
};

use crate::{error::RecommendError, AppState};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        .route("/titles", get(list_titles))
        .route("/recommendations", get(get_recommendations))
}

/// GET /health: catalog size and enrichment cache counters
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let stats = state.service.cache().stats().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        items: saturating_u32(state.service.catalog().len()),
        cache: CacheStatsView {
            hits: stats.hits,
            misses: stats.misses,
            entries: saturating_u32(stats.entries),
            capacity: saturating_u32(stats.capacity),
        },
    })
}

/// GET /titles: every selectable title, sorted
pub async fn list_titles(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let titles = state
        .service
        .catalog()
        .titles_sorted()
        .into_iter()
        .map(str::to_string)
        .collect();
    Json(TitlesResponse { titles })
}

#[derive(serde::Deserialize)]
pub struct RecommendationsQuery {
    pub title: Option<String>,
}

/// GET /recommendations?title=...
pub async fn get_recommendations(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RecommendationsQuery>,
) -> Response {
    let Some(title) = query.title.filter(|t| !t.trim().is_empty()) else {
        return error_response(
            StatusCode::BAD_REQUEST,
            ApiErrorKind::BadRequest,
            "query parameter 'title' is required",
        );
    };

    match state.service.get_recommendations(&title).await {
        Ok(recs) => Json(RecommendationsResponse::new(title, recs)).into_response(),
        Err(e @ RecommendError::NotFound { .. }) => {
            error_response(StatusCode::NOT_FOUND, ApiErrorKind::NotFound, e.to_string())
        }
        Err(e @ RecommendError::InvalidSelection { .. }) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiErrorKind::Internal,
            e.to_string(),
        ),
    }
}

fn error_response(status: StatusCode, kind: ApiErrorKind, message: impl Into<String>) -> Response {
    (status, Json(ApiError::new(kind, message))).into_response()
}

fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
