//! Fetch error taxonomy

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// Server answered with a non-success status
    #[error("HTTP {status} for {url}")]
    Status { status: StatusCode, url: String },

    /// Connection failure, timeout, or the body could not be read
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Body arrived but is not JSON
    #[error("invalid JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl FetchError {
    /// 429 / 503: retried with a backoff that grows with each attempt.
    pub fn is_rate_limited(&self) -> bool {
        matches!(
            self,
            FetchError::Status { status, .. }
                if *status == StatusCode::TOO_MANY_REQUESTS
                    || *status == StatusCode::SERVICE_UNAVAILABLE
        )
    }

    /// Failures worth another attempt after a fixed pause.
    pub fn is_transient(&self) -> bool {
        matches!(self, FetchError::Transport { .. } | FetchError::Decode { .. })
    }
}
