//! Error types for the caching layer
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the caching layer.
///
/// Absence of a key is not an error at the library level (`retrieve` returns
/// `Ok(None)`); the `NotFound` variant exists so the HTTP layer can translate
/// absence into a 404.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key not found (HTTP-layer translation of an absent value)
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Stored bytes are not valid UTF-8
    #[error("Invalid UTF-8 in stored value: {0}")]
    Decode(#[from] std::string::FromUtf8Error),

    /// Stored bytes are not a valid base-10 integer
    #[error("Value is not a valid integer: {0}")]
    Format(#[from] std::num::ParseIntError),

    /// Store-level type clash (e.g. incr on a list key)
    #[error("Wrong value type for key: {0}")]
    WrongType(String),

    /// Backing store unreachable or erroring
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Page fetch failed; nothing was cached
    #[error("Fetch failed for {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            CacheError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            CacheError::Decode(err) => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
            CacheError::Format(err) => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
            CacheError::WrongType(msg) => (StatusCode::CONFLICT, msg.clone()),
            CacheError::StoreUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            CacheError::Fetch { .. } => (StatusCode::BAD_GATEWAY, self.to_string()),
            CacheError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the caching layer.
pub type Result<T> = std::result::Result<T, CacheError>;
