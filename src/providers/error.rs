use polars::error::PolarsError;
use std::time::Duration;
use thiserror::Error;

/// Failure of a single outbound provider call. These never reach the caller of the engine:
/// the affected channel degrades to absent months instead.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse JSON response from {url}")]
    JsonParse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Malformed series from {url}: {timestamps} timestamps but {values} values")]
    MalformedSeries {
        url: String,
        timestamps: usize,
        values: usize,
    },

    #[error("Provider call exceeded deadline of {0:?}")]
    Timeout(Duration),

    #[error("Failed reducing provider series")]
    Reduce(#[from] PolarsError),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
