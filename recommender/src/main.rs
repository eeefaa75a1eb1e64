use std::sync::Arc;

use recommender::{
    api,
    catalog::Catalog,
    config::Config,
    enrichment::{EnrichmentCache, TmdbClient},
    service::RecommendationService,
    AppState,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recommender=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    info!(port = config.port, "recommender starting");

    // Catalog: both artifacts or nothing. No requests are served without it.
    let catalog = Arc::new(Catalog::load(&config.items_path, &config.similarity_path)?);

    if config.tmdb.api_key.is_none() {
        warn!("TMDB_API_KEY is not set; every metadata lookup will fail and no recommendations will have artwork");
    }
    let source = Arc::new(TmdbClient::new(config.tmdb.clone())?);
    let cache = Arc::new(
        EnrichmentCache::new(source, config.cache_capacity)
            .with_lookup_timeout(config.tmdb.timeout),
    );
    info!(
        capacity = config.cache_capacity.get(),
        timeout_secs = config.tmdb.timeout.as_secs(),
        "enrichment cache ready"
    );

    let service =
        RecommendationService::new(catalog, cache).with_options(config.assemble_options());
    let state = Arc::new(AppState { service });

    let app = api::router()
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    info!("listening on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
