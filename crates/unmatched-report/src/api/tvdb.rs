//! TVDb v4 client.
//!
//! v4 requires a bearer token obtained from `/login`; the token is fetched on
//! first use and reused for the lifetime of the client.

use super::error::{ProviderError, Result};
use super::http::{build_client, decode};
use super::traits::SeriesSource;
use super::types::*;
use async_trait::async_trait;
use reqwest::Client;
use shared::config::TvdbConfig;
use tokio::sync::OnceCell;
use tracing::{debug, info};

const PROVIDER: &str = "tvdb";

/// TVDb client for series search and series genres
pub struct TvdbClient {
    client: Client,
    api_key: String,
    pin: Option<String>,
    base_url: String,
    site_url: String,
    token: OnceCell<String>,
}

impl TvdbClient {
    /// Create a new TVDb client from configuration
    pub fn new(config: &TvdbConfig) -> anyhow::Result<Self> {
        Ok(Self::with_client(build_client()?, config))
    }

    /// Create a TVDb client around an existing reqwest client
    pub fn with_client(client: Client, config: &TvdbConfig) -> Self {
        Self {
            client,
            api_key: config.api_key.clone(),
            pin: config.pin.clone().filter(|p| !p.is_empty()),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            site_url: config.site_url.trim_end_matches('/').to_string(),
            token: OnceCell::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn token(&self) -> Result<&str> {
        self.token
            .get_or_try_init(|| self.login())
            .await
            .map(String::as_str)
    }

    async fn login(&self) -> Result<String> {
        if self.api_key.is_empty() {
            return Err(ProviderError::MissingApiKey(PROVIDER));
        }

        let response = self
            .client
            .post(self.url("/login"))
            .json(&TvdbLoginRequest {
                apikey: &self.api_key,
                pin: self.pin.as_deref(),
            })
            .send()
            .await?;

        let body: TvdbResponse<TvdbLoginData> = decode(PROVIDER, response).await?;
        let token = body
            .data
            .map(|d| d.token)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                ProviderError::Auth(body.status.unwrap_or_else(|| "no token returned".to_string()))
            })?;

        info!("Authenticated with TVDb");
        Ok(token)
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Option<T>> {
        let token = self.token().await?;
        let response = self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .query(params)
            .send()
            .await?;

        let body: TvdbResponse<T> = decode(PROVIDER, response).await?;
        Ok(body.data)
    }
}

#[async_trait]
impl SeriesSource for TvdbClient {
    fn id(&self) -> &'static str {
        PROVIDER
    }

    async fn search_series(&self, query: &str) -> Result<Vec<SeriesCandidate>> {
        debug!(query, "Searching TVDb series");
        let results: Option<Vec<TvdbSearchResult>> = self
            .get("/search", &[("query", query), ("type", "series")])
            .await?;
        Ok(results
            .unwrap_or_default()
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn series_genres(&self, series_id: &str) -> Result<Vec<String>> {
        debug!(series_id, "Fetching TVDb series details");
        let details: Option<TvdbSeriesExtended> = self
            .get(&format!("/series/{}/extended", series_id), &[("short", "true")])
            .await?;
        Ok(details
            .map(|d| d.genres.into_iter().map(|g| g.name).collect())
            .unwrap_or_default())
    }

    fn series_url(&self, slug: &str) -> String {
        format!("{}/series/{}", self.site_url, slug)
    }
}
