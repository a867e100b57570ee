//! Request DTOs for the caching layer API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

use crate::cache::StoredValue;

/// Request body for the store operation (PUT /store)
///
/// The body is the tagged scalar itself, e.g.
/// `{"kind": "text", "value": "hello"}` or `{"kind": "integer", "value": 42}`.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreRequest {
    /// The scalar value to store
    #[serde(flatten)]
    pub value: StoredValue,
}

/// Decode selector for the retrieve operation (GET /retrieve/:key?as=...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodeAs {
    /// Return the raw stored bytes
    #[default]
    Raw,
    /// Decode the bytes as UTF-8 text
    Text,
    /// Parse the bytes as a base-10 integer
    Integer,
}

/// Query string for the retrieve operation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RetrieveQuery {
    /// Requested decoding, defaults to raw bytes
    #[serde(default, rename = "as")]
    pub decode_as: DecodeAs,
}

/// Query string for the page cache operation (GET /page?url=...)
#[derive(Debug, Clone, Deserialize)]
pub struct PageQuery {
    /// The URL to fetch through the cache
    pub url: String,
}

impl PageQuery {
    /// Validates the query data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.url.is_empty() {
            return Some("URL cannot be empty".to_string());
        }
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Some("URL must use the http or https scheme".to_string());
        }
        None
    }
}
