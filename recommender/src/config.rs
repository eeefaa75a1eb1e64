use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use crate::assembler::AssembleOptions;
use crate::enrichment::TmdbConfig;

#[derive(Debug, Clone)]
pub struct Config {
    /// Port the API listens on
    pub port: u16,
    /// JSON array of `{movie_id, title}`
    pub items_path: PathBuf,
    /// JSON N×N similarity matrix, rows in item order
    pub similarity_path: PathBuf,
    /// Metadata service settings, including the per-lookup timeout
    pub tmdb: TmdbConfig,
    /// Maximum number of enrichment records kept in memory
    pub cache_capacity: NonZeroUsize,
    /// Recommendations returned per request
    pub recommendation_count: usize,
    /// Ranked candidates examined per request before giving up; `None`
    /// walks the whole ranking (`RECOMMENDATION_MAX_CANDIDATES=0`, the default)
    pub max_candidates: Option<usize>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let cache_capacity = env_parse("ENRICHMENT_CACHE_CAPACITY", 100usize)?;
        let cache_capacity = NonZeroUsize::new(cache_capacity)
            .ok_or_else(|| anyhow::anyhow!("ENRICHMENT_CACHE_CAPACITY must be at least 1"))?;

        let max_candidates = match env_parse("RECOMMENDATION_MAX_CANDIDATES", 0usize)? {
            0 => None,
            n => Some(n),
        };

        Ok(Self {
            port: env_parse("RECOMMENDER_PORT", 8501)?,
            items_path: PathBuf::from(env_str("CATALOG_ITEMS_PATH", "model/movies.json")),
            similarity_path: PathBuf::from(env_str(
                "CATALOG_SIMILARITY_PATH",
                "model/similarity.json",
            )),
            tmdb: TmdbConfig {
                api_key: std::env::var("TMDB_API_KEY")
                    .ok()
                    .filter(|key| !key.trim().is_empty()),
                api_base_url: env_str("TMDB_API_BASE_URL", "https://api.themoviedb.org/3"),
                image_base_url: env_str("TMDB_IMAGE_BASE_URL", "https://image.tmdb.org/t/p/w500"),
                language: env_str("TMDB_LANGUAGE", "en-US"),
                timeout: Duration::from_secs(env_parse("ENRICHMENT_TIMEOUT_SECS", 5)?),
            },
            cache_capacity,
            recommendation_count: env_parse("RECOMMENDATION_COUNT", 5)?,
            max_candidates,
        })
    }

    pub fn assemble_options(&self) -> AssembleOptions {
        AssembleOptions {
            k: self.recommendation_count,
            max_candidates: self.max_candidates,
        }
    }
}

fn env_str(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> anyhow::Result<T>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Failed to parse env var {key}={val}: {e}")),
        Err(_) => Ok(default),
    }
}
