//! In-Memory Store Backend
//!
//! The bundled `StoreClient` implementation: HashMap storage with TTL
//! expiration behind an async RwLock. Every trait method takes the write or
//! read lock for its full duration, which is what makes `incr` and `rpush`
//! atomic with respect to concurrent callers.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{CacheError, Result};
use crate::store::{StoreClient, StoreEntry, StoreStats, StoreValue};

// == Memory Store ==
/// In-memory key-value store with TTL support and retrieval statistics.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    /// Key-value storage
    entries: HashMap<String, StoreEntry>,
    /// Retrieval statistics
    stats: StoreStats,
}

impl Inner {
    /// Removes the entry if it has expired, returning whether it was removed.
    fn drop_if_expired(&mut self, key: &str) -> bool {
        if self.entries.get(key).is_some_and(|e| e.is_expired()) {
            self.entries.remove(key);
            self.stats.record_purged(1);
            true
        } else {
            false
        }
    }
}

impl MemoryStore {
    // == Constructor ==
    /// Creates a new empty MemoryStore.
    pub fn new() -> Self {
        Self::default()
    }

    // == Stats ==
    /// Returns current backend statistics.
    pub async fn stats(&self) -> StoreStats {
        let inner = self.inner.read().await;
        let mut stats = inner.stats.clone();
        stats.set_total_keys(inner.entries.len());
        stats
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the store.
    ///
    /// Returns the number of entries removed.
    pub async fn purge_expired(&self) -> usize {
        let mut inner = self.inner.write().await;

        let expired_keys: Vec<String> = inner
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();

        for key in expired_keys {
            inner.entries.remove(&key);
        }

        inner.stats.record_purged(count as u64);
        count
    }

    // == Length ==
    /// Returns the current number of entries, expired or not.
    pub async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }

    /// Returns true if the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.entries.is_empty()
    }
}

#[async_trait]
impl StoreClient for MemoryStore {
    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner
            .entries
            .insert(key.to_string(), StoreEntry::new(StoreValue::Bytes(value.to_vec()), None));
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut inner = self.inner.write().await;
        inner.drop_if_expired(key);

        match inner.entries.get(key) {
            Some(entry) => match &entry.value {
                StoreValue::Bytes(bytes) => {
                    let bytes = bytes.clone();
                    inner.stats.record_hit();
                    Ok(Some(bytes))
                }
                StoreValue::List(_) => Err(CacheError::WrongType(key.to_string())),
            },
            None => {
                inner.stats.record_miss();
                Ok(None)
            }
        }
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        let mut inner = self.inner.write().await;
        inner.drop_if_expired(key);

        let next = match inner.entries.get(key) {
            Some(entry) => match &entry.value {
                StoreValue::Bytes(bytes) => {
                    let current: i64 = std::str::from_utf8(bytes)
                        .ok()
                        .and_then(|s| s.parse().ok())
                        .ok_or_else(|| CacheError::WrongType(key.to_string()))?;
                    current + 1
                }
                StoreValue::List(_) => return Err(CacheError::WrongType(key.to_string())),
            },
            None => 1,
        };

        // Counters keep whatever expiry the entry already had
        let expires_at = inner.entries.get(key).and_then(|e| e.expires_at);
        let mut entry = StoreEntry::new(StoreValue::Bytes(next.to_string().into_bytes()), None);
        entry.expires_at = expires_at;
        inner.entries.insert(key.to_string(), entry);

        Ok(next)
    }

    async fn rpush(&self, key: &str, value: &str) -> Result<u64> {
        let mut inner = self.inner.write().await;
        inner.drop_if_expired(key);

        match inner.entries.get_mut(key) {
            Some(entry) => match &mut entry.value {
                StoreValue::List(items) => {
                    items.push(value.to_string());
                    Ok(items.len() as u64)
                }
                StoreValue::Bytes(_) => Err(CacheError::WrongType(key.to_string())),
            },
            None => {
                inner.entries.insert(
                    key.to_string(),
                    StoreEntry::new(StoreValue::List(vec![value.to_string()]), None),
                );
                Ok(1)
            }
        }
    }

    async fn lrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<String>> {
        let mut inner = self.inner.write().await;
        inner.drop_if_expired(key);

        match inner.entries.get(key) {
            Some(entry) => match &entry.value {
                StoreValue::List(items) => {
                    let len = items.len() as i64;
                    // Negative indices count from the end, like the backing
                    // store this contract is modeled on
                    let from = if start < 0 { (len + start).max(0) } else { start.min(len) };
                    let to = if stop < 0 { len + stop } else { stop.min(len - 1) };

                    if from > to || to < 0 {
                        return Ok(Vec::new());
                    }
                    Ok(items[from as usize..=(to as usize)].to_vec())
                }
                StoreValue::Bytes(_) => Err(CacheError::WrongType(key.to_string())),
            },
            None => Ok(Vec::new()),
        }
    }

    async fn setex(&self, key: &str, seconds: u64, value: &[u8]) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner.entries.insert(
            key.to_string(),
            StoreEntry::new(StoreValue::Bytes(value.to_vec()), Some(seconds)),
        );
        Ok(())
    }

    async fn flushdb(&self) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner.entries.clear();
        Ok(())
    }
}
