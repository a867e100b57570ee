//! Page Fetcher Module
//!
//! The HTTP collaborator contract and its reqwest-backed implementation.
//! Fetches are synchronous request/response with a bounded timeout and no
//! retries.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{CacheError, Result};

// == Page Fetcher Trait ==
/// Contract for fetching the text content of a URL.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches the body of `url` as text.
    async fn fetch(&self, url: &str) -> Result<String>;
}

// == HTTP Fetcher ==
/// reqwest-backed page fetcher with a per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    // == Constructor ==
    /// Creates a fetcher whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CacheError::StoreUnavailable(format!("HTTP client build failed: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| CacheError::Fetch {
                url: url.to_string(),
                source,
            })?;

        let response = response
            .error_for_status()
            .map_err(|source| CacheError::Fetch {
                url: url.to_string(),
                source,
            })?;

        response.text().await.map_err(|source| CacheError::Fetch {
            url: url.to_string(),
            source,
        })
    }
}
