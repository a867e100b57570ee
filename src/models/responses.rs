//! Response DTOs for the caching layer API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

// == Retrieved Value ==
/// A retrieved value in the decoding requested by the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum RetrievedValue {
    /// Raw stored bytes
    Raw(Vec<u8>),
    /// UTF-8 decoded text
    Text(String),
    /// Parsed base-10 integer
    Integer(i64),
}

/// Response body for the store operation (PUT /store)
#[derive(Debug, Clone, Serialize)]
pub struct StoreResponse {
    /// Success message
    pub message: String,
    /// The generated key the value was stored under
    pub key: String,
}

impl StoreResponse {
    /// Creates a new StoreResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Value stored under key '{}'", key),
            key,
        }
    }
}

/// Response body for the retrieve operation (GET /retrieve/:key)
#[derive(Debug, Clone, Serialize)]
pub struct RetrieveResponse {
    /// The requested key
    pub key: String,
    /// The stored value, decoded as requested
    pub value: RetrievedValue,
}

impl RetrieveResponse {
    /// Creates a new RetrieveResponse
    pub fn new(key: impl Into<String>, value: RetrievedValue) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Response body for the page cache operation (GET /page)
#[derive(Debug, Clone, Serialize)]
pub struct PageResponse {
    /// The requested URL
    pub url: String,
    /// The page content (cached or freshly fetched)
    pub content: String,
    /// How many times the URL has been requested through the cache
    pub access_count: i64,
}

impl PageResponse {
    /// Creates a new PageResponse
    pub fn new(url: impl Into<String>, content: impl Into<String>, access_count: i64) -> Self {
        Self {
            url: url.into(),
            content: content.into(),
            access_count,
        }
    }
}

/// Response body for the flush operation (POST /flush)
#[derive(Debug, Clone, Serialize)]
pub struct FlushResponse {
    /// Success message
    pub message: String,
}

impl FlushResponse {
    /// Creates a new FlushResponse
    pub fn new() -> Self {
        Self {
            message: "All entries flushed".to_string(),
        }
    }
}

impl Default for FlushResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of backend retrieval hits
    pub hits: u64,
    /// Number of backend retrieval misses
    pub misses: u64,
    /// Number of expired entries purged
    pub purged: u64,
    /// Current number of live keys
    pub total_keys: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from backend statistics
    pub fn new(hits: u64, misses: u64, purged: u64, total_keys: usize) -> Self {
        let total_requests = hits + misses;
        let hit_rate = if total_requests > 0 {
            hits as f64 / total_requests as f64
        } else {
            0.0
        };
        Self {
            hits,
            misses,
            purged,
            total_keys,
            hit_rate,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
