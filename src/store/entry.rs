//! Store Entry Module
//!
//! Defines the structure for individual store entries with TTL support.

use std::time::{SystemTime, UNIX_EPOCH};

// == Store Value ==
/// The payload of a store entry.
///
/// Plain byte values come from `set`/`setex` and `incr`; lists come from
/// `rpush`. The two kinds never convert into each other.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreValue {
    /// Raw bytes, opaque to the store
    Bytes(Vec<u8>),
    /// Ordered list of text entries
    List(Vec<String>),
}

// == Store Entry ==
/// A single store entry with payload and optional expiry.
#[derive(Debug, Clone)]
pub struct StoreEntry {
    /// The stored payload
    pub value: StoreValue,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    pub expires_at: Option<u64>,
}

impl StoreEntry {
    // == Constructor ==
    /// Creates a new store entry with optional TTL.
    ///
    /// # Arguments
    /// * `value` - The payload to store
    /// * `ttl_seconds` - Optional TTL in seconds
    pub fn new(value: StoreValue, ttl_seconds: Option<u64>) -> Self {
        let now = current_timestamp_ms();
        let expires_at = ttl_seconds.map(|ttl| now + (ttl * 1000));

        Self {
            value,
            created_at: now,
            expires_at,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is expired once the current time is
    /// greater than or equal to the expiration time.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires) => current_timestamp_ms() >= expires,
            None => false,
        }
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}
