//! TMDb v3 client.

use super::error::{ProviderError, Result};
use super::http::{build_client, decode};
use super::traits::MovieSource;
use super::types::*;
use async_trait::async_trait;
use reqwest::Client;
use shared::config::TmdbConfig;
use tracing::debug;

const PROVIDER: &str = "tmdb";

/// TMDb client for movie search, movie keywords and collection search
pub struct TmdbClient {
    client: Client,
    api_key: String,
    base_url: String,
    site_url: String,
}

impl TmdbClient {
    /// Create a new TMDb client from configuration
    pub fn new(config: &TmdbConfig) -> anyhow::Result<Self> {
        Ok(Self::with_client(build_client()?, config))
    }

    /// Create a TMDb client around an existing reqwest client
    pub fn with_client(client: Client, config: &TmdbConfig) -> Self {
        Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            site_url: config.site_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        if self.api_key.is_empty() {
            return Err(ProviderError::MissingApiKey(PROVIDER));
        }

        let response = self
            .client
            .get(self.url(path))
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        decode(PROVIDER, response).await
    }
}

#[async_trait]
impl MovieSource for TmdbClient {
    fn id(&self) -> &'static str {
        PROVIDER
    }

    async fn search_movies(&self, query: &str) -> Result<Vec<MovieCandidate>> {
        debug!(query, "Searching TMDb movies");
        let response: TmdbSearchResponse<TmdbMovieResult> =
            self.get("/search/movie", &[("query", query)]).await?;
        Ok(response.results.into_iter().map(Into::into).collect())
    }

    async fn movie_keywords(&self, movie_id: i64) -> Result<Vec<String>> {
        debug!(movie_id, "Fetching TMDb keywords");
        let response: TmdbKeywordsResponse = self
            .get(&format!("/movie/{}/keywords", movie_id), &[])
            .await?;
        Ok(response.keywords.into_iter().map(|k| k.name).collect())
    }

    async fn search_collections(&self, query: &str) -> Result<Vec<CollectionCandidate>> {
        debug!(query, "Searching TMDb collections");
        let response: TmdbSearchResponse<TmdbCollectionResult> =
            self.get("/search/collection", &[("query", query)]).await?;
        Ok(response.results.into_iter().map(Into::into).collect())
    }

    fn movie_url(&self, movie_id: i64) -> String {
        format!("{}/movie/{}", self.site_url, movie_id)
    }

    fn collection_url(&self, collection_id: i64) -> String {
        format!("{}/collection/{}", self.site_url, collection_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> TmdbConfig {
        TmdbConfig {
            site_url: "https://www.themoviedb.org/".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_canonical_urls() {
        let client = TmdbClient::new(&config()).unwrap();
        assert_eq!(client.movie_url(27205), "https://www.themoviedb.org/movie/27205");
        assert_eq!(
            client.collection_url(8091),
            "https://www.themoviedb.org/collection/8091"
        );
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_before_network() {
        let client = TmdbClient::new(&config()).unwrap();
        let result = client.search_movies("Inception").await;
        assert!(matches!(result, Err(ProviderError::MissingApiKey("tmdb"))));
    }
}
