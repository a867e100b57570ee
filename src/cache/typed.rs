//! Typed Cache Module
//!
//! Stores scalar values under generated keys and retrieves them with typed
//! decoding. All state lives in the backing store; the cache itself only
//! holds the store handle.

use std::sync::Arc;

use async_trait::async_trait;

use crate::cache::{Key, StoredValue};
use crate::error::Result;
use crate::instrument::{count_calls, record_history, CountCalls, Operation, OperationIdentity, RecordHistory};
use crate::store::StoreClient;

/// Identity of the typed cache's store operation, used to namespace its
/// instrumentation.
pub const STORE_IDENTITY: OperationIdentity = OperationIdentity::new("TypedCache", "store");

// == Typed Cache ==
/// Typed key-value cache fronting a backing store.
#[derive(Clone)]
pub struct TypedCache {
    store: Arc<dyn StoreClient>,
}

impl TypedCache {
    // == Initialize ==
    /// Creates a cache over `store`, flushing all existing entries.
    ///
    /// The flush is irreversible and happens on every call, so initializing
    /// twice is allowed and simply flushes again.
    pub async fn initialize(store: Arc<dyn StoreClient>) -> Result<Self> {
        store.flushdb().await?;
        Ok(Self { store })
    }

    /// Returns a handle to the backing store.
    pub fn store_client(&self) -> Arc<dyn StoreClient> {
        self.store.clone()
    }

    // == Store ==
    /// Stores a scalar value under a freshly generated key.
    pub async fn store(&self, value: &StoredValue) -> Result<Key> {
        let key = Key::generate();
        self.store.set(key.as_str(), &value.to_bytes()).await?;
        Ok(key)
    }

    // == Retrieve ==
    /// Retrieves the raw bytes for a key, or None if the key is unknown.
    pub async fn retrieve(&self, key: &Key) -> Result<Option<Vec<u8>>> {
        self.store.get(key.as_str()).await
    }

    /// Retrieves the bytes for a key and applies a decode function.
    ///
    /// Returns None when the key is unknown; decode failures propagate to
    /// the caller.
    pub async fn retrieve_with<T, F>(&self, key: &Key, decode: F) -> Result<Option<T>>
    where
        F: FnOnce(Vec<u8>) -> Result<T>,
    {
        match self.retrieve(key).await? {
            Some(bytes) => Ok(Some(decode(bytes)?)),
            None => Ok(None),
        }
    }

    /// Retrieves a value and decodes it as UTF-8 text.
    ///
    /// Fails with a decode error when the stored bytes are not valid UTF-8.
    pub async fn retrieve_text(&self, key: &Key) -> Result<Option<String>> {
        self.retrieve_with(key, |bytes| Ok(String::from_utf8(bytes)?))
            .await
    }

    /// Retrieves a value and parses it as a base-10 integer.
    ///
    /// Fails with a format error when the stored bytes are not numeric.
    pub async fn retrieve_int(&self, key: &Key) -> Result<Option<i64>> {
        self.retrieve_with(key, |bytes| Ok(String::from_utf8(bytes)?.parse()?))
            .await
    }
}

// == Store Operation ==
/// The typed cache's store call as a wrappable [`Operation`].
pub struct StoreValueOp {
    cache: Arc<TypedCache>,
}

impl StoreValueOp {
    pub fn new(cache: Arc<TypedCache>) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl Operation<StoredValue, Key> for StoreValueOp {
    async fn call(&self, args: StoredValue) -> Result<Key> {
        self.cache.store(&args).await
    }
}

// == Instrumented Store ==
/// Builds the reference wrapper stack around the store operation:
/// counting outside, history inside.
pub fn instrumented_store(cache: Arc<TypedCache>) -> CountCalls<RecordHistory<StoreValueOp>> {
    let store = cache.store_client();
    count_calls(
        STORE_IDENTITY,
        store.clone(),
        record_history(STORE_IDENTITY, store, StoreValueOp::new(cache)),
    )
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CacheError;
    use crate::store::MemoryStore;

    async fn test_cache() -> TypedCache {
        let store: Arc<dyn StoreClient> = Arc::new(MemoryStore::new());
        TypedCache::initialize(store).await.unwrap()
    }

    #[tokio::test]
    async fn test_store_and_retrieve_roundtrip() {
        let cache = test_cache().await;

        let key = cache
            .store(&StoredValue::Text("hello".to_string()))
            .await
            .unwrap();
        let bytes = cache.retrieve(&key).await.unwrap();

        assert_eq!(bytes, Some(b"hello".to_vec()));
    }

    #[tokio::test]
    async fn test_retrieve_unknown_key() {
        let cache = test_cache().await;

        let bytes = cache.retrieve(&Key::generate()).await.unwrap();
        assert_eq!(bytes, None);
    }

    #[tokio::test]
    async fn test_store_generates_distinct_keys() {
        let cache = test_cache().await;
        let value = StoredValue::Integer(7);

        let a = cache.store(&value).await.unwrap();
        let b = cache.store(&value).await.unwrap();
        assert_ne!(a, b);

        // Both keys resolve independently
        assert_eq!(cache.retrieve_int(&a).await.unwrap(), Some(7));
        assert_eq!(cache.retrieve_int(&b).await.unwrap(), Some(7));
    }

    #[tokio::test]
    async fn test_retrieve_text() {
        let cache = test_cache().await;

        let key = cache
            .store(&StoredValue::Text("caf\u{00e9}".to_string()))
            .await
            .unwrap();
        let text = cache.retrieve_text(&key).await.unwrap();
        assert_eq!(text.as_deref(), Some("caf\u{00e9}"));
    }

    #[tokio::test]
    async fn test_retrieve_text_invalid_utf8() {
        let cache = test_cache().await;

        let key = cache
            .store(&StoredValue::Binary(vec![0xff, 0xfe]))
            .await
            .unwrap();
        let result = cache.retrieve_text(&key).await;
        assert!(matches!(result, Err(CacheError::Decode(_))));
    }

    #[tokio::test]
    async fn test_retrieve_int() {
        let cache = test_cache().await;

        let key = cache.store(&StoredValue::Integer(42)).await.unwrap();
        assert_eq!(cache.retrieve_int(&key).await.unwrap(), Some(42));
    }

    #[tokio::test]
    async fn test_retrieve_int_non_numeric() {
        let cache = test_cache().await;

        let key = cache
            .store(&StoredValue::Text("abc".to_string()))
            .await
            .unwrap();
        let result = cache.retrieve_int(&key).await;
        assert!(matches!(result, Err(CacheError::Format(_))));
    }

    #[tokio::test]
    async fn test_initialize_flushes_existing_state() {
        let store: Arc<dyn StoreClient> = Arc::new(MemoryStore::new());
        let cache = TypedCache::initialize(store.clone()).await.unwrap();

        let key = cache
            .store(&StoredValue::Text("ephemeral".to_string()))
            .await
            .unwrap();
        assert!(cache.retrieve(&key).await.unwrap().is_some());

        // Re-initializing over the same store flushes everything
        let cache = TypedCache::initialize(store).await.unwrap();
        assert_eq!(cache.retrieve(&key).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_instrumented_store_records_and_counts() {
        let store: Arc<dyn StoreClient> = Arc::new(MemoryStore::new());
        let cache = Arc::new(TypedCache::initialize(store.clone()).await.unwrap());
        let op = instrumented_store(cache.clone());

        let key1 = op.call(StoredValue::Text("first".to_string())).await.unwrap();
        let key2 = op.call(StoredValue::Integer(2)).await.unwrap();

        // The wrapped operation still stores for real
        assert_eq!(cache.retrieve_text(&key1).await.unwrap().as_deref(), Some("first"));
        assert_eq!(cache.retrieve_int(&key2).await.unwrap(), Some(2));

        let counter = store.get(&STORE_IDENTITY.counter_key()).await.unwrap();
        assert_eq!(counter, Some(b"2".to_vec()));

        let inputs = store.lrange(&STORE_IDENTITY.inputs_key(), 0, -1).await.unwrap();
        let outputs = store.lrange(&STORE_IDENTITY.outputs_key(), 0, -1).await.unwrap();
        assert_eq!(inputs, vec!["first", "2"]);
        assert_eq!(outputs, vec![key1.as_str().to_string(), key2.as_str().to_string()]);
    }
}
