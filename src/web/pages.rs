//! Page Cache Module
//!
//! Caches fetched page content with a fixed TTL and counts every access,
//! hit or miss. Content and counters live in the backing store under
//! separate namespace prefixes.

use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::store::StoreClient;
use crate::web::PageFetcher;

/// Namespace prefix for cached page content.
const CONTENT_PREFIX: &str = "page:";

/// Namespace prefix for page access counters.
const COUNT_PREFIX: &str = "count:";

// == Page Cache ==
/// Time-bounded cache for fetched web content.
pub struct PageCache {
    store: Arc<dyn StoreClient>,
    fetcher: Arc<dyn PageFetcher>,
    /// Content TTL in seconds
    ttl: u64,
}

impl PageCache {
    // == Constructor ==
    /// Creates a page cache over `store`, fetching misses through `fetcher`
    /// and expiring content after `ttl` seconds.
    pub fn new(store: Arc<dyn StoreClient>, fetcher: Arc<dyn PageFetcher>, ttl: u64) -> Self {
        Self {
            store,
            fetcher,
            ttl,
        }
    }

    fn content_key(url: &str) -> String {
        format!("{CONTENT_PREFIX}{url}")
    }

    fn count_key(url: &str) -> String {
        format!("{COUNT_PREFIX}{url}")
    }

    // == Get Cached Page ==
    /// Returns the content of `url`, serving from the cache when possible.
    ///
    /// The access counter is incremented exactly once per call, before the
    /// cache lookup, so hits and misses count alike. On a miss the content
    /// is fetched, cached with the configured TTL, and returned; a failed
    /// fetch propagates and caches nothing.
    pub async fn get_cached_page(&self, url: &str) -> Result<String> {
        self.store.incr(&Self::count_key(url)).await?;

        if let Some(bytes) = self.store.get(&Self::content_key(url)).await? {
            debug!(url, "page cache hit");
            return Ok(String::from_utf8(bytes)?);
        }

        debug!(url, "page cache miss, fetching");
        let content = self.fetcher.fetch(url).await?;

        self.store
            .setex(&Self::content_key(url), self.ttl, content.as_bytes())
            .await?;

        Ok(content)
    }

    // == Access Count ==
    /// Returns how many times `url` has been requested through this cache.
    pub async fn access_count(&self, url: &str) -> Result<i64> {
        match self.store.get(&Self::count_key(url)).await? {
            Some(bytes) => Ok(String::from_utf8(bytes)?.parse()?),
            None => Ok(0),
        }
    }
}
