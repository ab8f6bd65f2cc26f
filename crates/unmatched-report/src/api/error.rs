//! Provider error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{provider} returned status {status}: {message}")]
    Status {
        provider: &'static str,
        status: u16,
        message: String,
    },

    #[error("Failed to decode {provider} response: {source}")]
    Decode {
        provider: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("TVDb login failed: {0}")]
    Auth(String),

    #[error("No API key configured for {0}")]
    MissingApiKey(&'static str),
}

pub type Result<T> = std::result::Result<T, ProviderError>;
