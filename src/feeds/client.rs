//! HTTP fetch boundary for the two feeds.
//!
//! All transport, status, and decode failures are classified here, per
//! source, so the merge logic downstream only ever sees "document present"
//! or "document absent".

use std::time::Duration;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use super::documents::{EvseDataDocument, EvseStatusDocument};

/// Error raised while fetching a single feed.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level failure: connect, DNS, or timeout.
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// The server answered with a non-success HTTP status.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// The body was not the expected JSON document.
    #[error("invalid JSON from {url}: {message}")]
    Decode { url: String, message: String },
}

/// Outcome of one fetch attempt for a single source.
pub type FeedOutcome<T> = Result<T, FetchError>;

/// Client for the station metadata and live status feeds.
pub struct FeedClient {
    http: reqwest::Client,
    stations_url: String,
    status_url: String,
    timeout_seconds: u64,
}

impl FeedClient {
    /// Create a client with a per-request timeout.
    pub fn new(stations_url: String, status_url: String, timeout_seconds: u64) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            stations_url,
            status_url,
            timeout_seconds,
        }
    }

    /// URL of the station metadata feed.
    pub fn stations_url(&self) -> &str {
        &self.stations_url
    }

    /// URL of the live status feed.
    pub fn status_url(&self) -> &str {
        &self.status_url
    }

    /// Fetch and decode the station metadata feed.
    pub async fn fetch_stations(&self) -> FeedOutcome<EvseDataDocument> {
        self.fetch_json(&self.stations_url).await
    }

    /// Fetch and decode the live status feed.
    pub async fn fetch_status(&self) -> FeedOutcome<EvseStatusDocument> {
        self.fetch_json(&self.status_url).await
    }

    /// Fetch both feeds concurrently.
    ///
    /// Each side settles independently; one feed failing never discards the
    /// other feed's document.
    pub async fn fetch_both(
        &self,
    ) -> (FeedOutcome<EvseDataDocument>, FeedOutcome<EvseStatusDocument>) {
        futures::future::join(self.fetch_stations(), self.fetch_status()).await
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> FeedOutcome<T> {
        debug!("GET {}", url);

        let response = self.http.get(url).send().await.map_err(|e| {
            let message = if e.is_timeout() {
                format!("timed out after {}s", self.timeout_seconds)
            } else if e.is_connect() {
                "connection failed".to_string()
            } else {
                e.to_string()
            };
            FetchError::Transport {
                url: url.to_string(),
                message,
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.json::<T>().await.map_err(|e| FetchError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_message() {
        let err = FetchError::Transport {
            url: "https://example.test/data.json".to_string(),
            message: "timed out after 30s".to_string(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("https://example.test/data.json"));
        assert!(rendered.contains("timed out after 30s"));
    }

    #[test]
    fn test_status_error_message() {
        let err = FetchError::Status {
            url: "https://example.test/status.json".to_string(),
            status: 503,
        };
        assert!(err.to_string().contains("HTTP 503"));
    }

    #[test]
    fn test_decode_error_message() {
        let err = FetchError::Decode {
            url: "https://example.test/data.json".to_string(),
            message: "expected value at line 1 column 1".to_string(),
        };
        assert!(err.to_string().contains("invalid JSON"));
    }

    #[test]
    fn test_client_keeps_urls() {
        let client = FeedClient::new(
            "https://example.test/data.json".to_string(),
            "https://example.test/status.json".to_string(),
            30,
        );
        assert_eq!(client.stations_url(), "https://example.test/data.json");
        assert_eq!(client.status_url(), "https://example.test/status.json");
    }
}
