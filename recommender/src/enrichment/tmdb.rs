use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::{EnrichmentError, EnrichmentRecord, MetadataSource, DEFAULT_LOOKUP_TIMEOUT};

#[derive(Debug, Clone)]
pub struct TmdbConfig {
    /// Without a key every lookup fails and items render without artwork.
    pub api_key: Option<String>,
    pub api_base_url: String,
    /// Prefix joined with each `poster_path`.
    pub image_base_url: String,
    pub language: String,
    pub timeout: Duration,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: "https://api.themoviedb.org/3".to_string(),
            image_base_url: "https://image.tmdb.org/t/p/w500".to_string(),
            language: "en-US".to_string(),
            timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }
}

/// `GET /movie/{id}` against The Movie Database.
pub struct TmdbClient {
    client: reqwest::Client,
    config: TmdbConfig,
}

#[derive(Debug, Deserialize)]
struct MovieDetails {
    poster_path: Option<String>,
    imdb_id: Option<String>,
}

impl TmdbClient {
    pub fn new(config: TmdbConfig) -> Result<Self, EnrichmentError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    fn artwork_url(&self, poster_path: &str) -> String {
        format!(
            "{}/{}",
            self.config.image_base_url.trim_end_matches('/'),
            poster_path.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl MetadataSource for TmdbClient {
    async fn fetch(&self, item_id: i64) -> Result<EnrichmentRecord, EnrichmentError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(EnrichmentError::MissingApiKey)?;
        let url = format!(
            "{}/movie/{item_id}",
            self.config.api_base_url.trim_end_matches('/')
        );

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", api_key), ("language", self.config.language.as_str())])
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(EnrichmentError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let details: MovieDetails = serde_json::from_slice(&body)?;

        Ok(EnrichmentRecord {
            artwork_url: non_empty(details.poster_path).map(|path| self.artwork_url(&path)),
            external_id: non_empty(details.imdb_id),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artwork_url_joins_without_double_slash() {
        let client = TmdbClient::new(TmdbConfig::default()).unwrap();
        assert_eq!(
            client.artwork_url("/kqjL17yufvn9OVLyXYpvtyrFfak.jpg"),
            "https://image.tmdb.org/t/p/w500/kqjL17yufvn9OVLyXYpvtyrFfak.jpg"
        );
        assert_eq!(
            client.artwork_url("abc.jpg"),
            "https://image.tmdb.org/t/p/w500/abc.jpg"
        );
    }

    #[test]
    fn test_non_empty_drops_blank_values() {
        assert_eq!(non_empty(Some("  ".to_string())), None);
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some("tt1".to_string())).as_deref(), Some("tt1"));
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_without_request() {
        let client = TmdbClient::new(TmdbConfig {
            api_base_url: "http://127.0.0.1:9".to_string(),
            ..TmdbConfig::default()
        })
        .unwrap();
        assert!(matches!(
            client.fetch(1).await,
            Err(EnrichmentError::MissingApiKey)
        ));
    }
}
