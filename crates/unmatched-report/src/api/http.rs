//! HTTP plumbing shared by the provider clients.

use super::error::{ProviderError, Result};
use anyhow::Context;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("unmatched-report/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client used by every provider
pub fn build_client() -> anyhow::Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .context("Failed to create HTTP client")
}

/// Check the status and decode the body of a provider response
pub async fn decode<T: DeserializeOwned>(provider: &'static str, response: Response) -> Result<T> {
    let status = response.status();
    let url = response.url().to_string();
    let body = response.text().await?;

    if !status.is_success() {
        warn!(provider, url = %redact(&url), status = %status, "Request failed");
        return Err(ProviderError::Status {
            provider,
            status: status.as_u16(),
            message: body,
        });
    }

    debug!(provider, url = %redact(&url), "Request successful");
    serde_json::from_str(&body).map_err(|source| ProviderError::Decode { provider, source })
}

/// Drop the query string so API keys never reach the logs
fn redact(url: &str) -> &str {
    url.split_once('?').map_or(url, |(path, _)| path)
}

/// First four characters of a provider date, if it has that many
pub fn year_of(date: Option<&str>) -> Option<&str> {
    date.and_then(|d| d.get(..4)).filter(|y| y.len() == 4)
}
