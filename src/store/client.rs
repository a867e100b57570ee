//! Store Client Contract
//!
//! The pluggable contract every backing key-value store must satisfy.
//! All mutating single-key operations are required to be atomic so that
//! concurrent callers can rely on the store alone for coordination.

use async_trait::async_trait;

use crate::error::Result;

// == Store Client Trait ==
/// Contract for a backing key-value store.
///
/// Keys are strings; plain values are raw bytes, opaque to the store.
/// Counters are plain values holding a base-10 integer, and history lists
/// are ordered sequences of text entries.
#[async_trait]
pub trait StoreClient: Send + Sync {
    /// Stores raw bytes under a key, overwriting any previous value.
    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Retrieves the raw bytes for a key, or None if absent.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Atomically increments the integer at `key` by 1 and returns the new
    /// value. An absent key starts from 0.
    ///
    /// Fails with `WrongType` if the key holds a list or non-numeric bytes.
    async fn incr(&self, key: &str) -> Result<i64>;

    /// Atomically appends a text entry to the list at `key` and returns the
    /// new list length. An absent key becomes a one-element list.
    ///
    /// Fails with `WrongType` if the key holds a plain value.
    async fn rpush(&self, key: &str, value: &str) -> Result<u64>;

    /// Returns the list elements between `start` and `stop` inclusive.
    ///
    /// Negative indices count from the end of the list (`-1` is the last
    /// element). An absent key yields an empty vector.
    async fn lrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<String>>;

    /// Stores raw bytes under a key with an expiry in seconds.
    async fn setex(&self, key: &str, seconds: u64, value: &[u8]) -> Result<()>;

    /// Deletes every key in the store.
    async fn flushdb(&self) -> Result<()>;
}
