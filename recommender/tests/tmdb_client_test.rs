//! TMDB client tests against an in-process fake metadata service

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use recommender::enrichment::{
    EnrichmentCache, EnrichmentError, MetadataSource, TmdbClient, TmdbConfig,
};

async fn movie(Path(id): Path<i64>, Query(params): Query<HashMap<String, String>>) -> Response {
    if params.get("api_key").map(String::as_str) != Some("test-key")
        || params.get("language").map(String::as_str) != Some("en-US")
    {
        return (StatusCode::UNAUTHORIZED, Json(json!({"status_code": 7}))).into_response();
    }
    match id {
        1 => Json(json!({
            "id": 1,
            "title": "Avatar",
            "poster_path": "/kqjL17yufvn9OVLyXYpvtyrFfak.jpg",
            "imdb_id": "tt0499549"
        }))
        .into_response(),
        2 => Json(json!({"poster_path": null, "imdb_id": ""})).into_response(),
        3 => (StatusCode::NOT_FOUND, Json(json!({"status_code": 34}))).into_response(),
        4 => "<html>gateway</html>".into_response(),
        5 => {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Json(json!({"poster_path": "/late.jpg"})).into_response()
        }
        _ => Json(json!({"imdb_id": "tt9"})).into_response(),
    }
}

async fn spawn_fake_tmdb() -> String {
    let app = Router::new().route("/3/movie/{id}", get(movie));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/3")
}

async fn client(api_key: Option<&str>) -> TmdbClient {
    let base = spawn_fake_tmdb().await;
    TmdbClient::new(TmdbConfig {
        api_key: api_key.map(str::to_string),
        api_base_url: base,
        timeout: Duration::from_millis(300),
        ..TmdbConfig::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_fetch_builds_artwork_url_and_external_id() {
    let client = client(Some("test-key")).await;

    let record = client.fetch(1).await.unwrap();
    assert_eq!(
        record.artwork_url.as_deref(),
        Some("https://image.tmdb.org/t/p/w500/kqjL17yufvn9OVLyXYpvtyrFfak.jpg")
    );
    assert_eq!(record.external_id.as_deref(), Some("tt0499549"));
}

#[tokio::test]
async fn test_fetch_treats_null_and_blank_fields_as_absent() {
    let client = client(Some("test-key")).await;

    let record = client.fetch(2).await.unwrap();
    assert!(record.is_empty());

    let record = client.fetch(99).await.unwrap();
    assert_eq!(record.artwork_url, None);
    assert_eq!(record.external_id.as_deref(), Some("tt9"));
}

#[tokio::test]
async fn test_fetch_maps_failures_to_errors() {
    let client = client(Some("test-key")).await;

    assert!(matches!(client.fetch(3).await, Err(EnrichmentError::Status(404))));
    assert!(matches!(client.fetch(4).await, Err(EnrichmentError::Decode(_))));
    match client.fetch(5).await {
        Err(EnrichmentError::Transport(e)) => assert!(e.is_timeout()),
        other => panic!("expected timeout, got {other:?}"),
    }
}

#[tokio::test]
async fn test_wrong_api_key_is_status_error() {
    let client = client(Some("other-key")).await;
    assert!(matches!(client.fetch(1).await, Err(EnrichmentError::Status(401))));
}

#[tokio::test]
async fn test_cache_over_tmdb_absorbs_failures() {
    let client = Arc::new(client(Some("test-key")).await);
    let cache = EnrichmentCache::new(client, NonZeroUsize::new(10).unwrap())
        .with_lookup_timeout(Duration::from_millis(300));

    assert!(cache.get(1).await.has_artwork());
    assert!(cache.get(3).await.is_empty());
    assert!(cache.get(4).await.is_empty());
    assert!(cache.get(5).await.is_empty());

    let stats = cache.stats().await;
    assert_eq!(stats.misses, 4);
    assert_eq!(stats.entries, 4);
}
