//! API Handlers
//!
//! HTTP request handlers for each caching layer endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::cache::{instrumented_store, Key, StoreValueOp, TypedCache, STORE_IDENTITY};
use crate::error::{CacheError, Result};
use crate::instrument::{replay, CallReport, CountCalls, Operation, RecordHistory};
use crate::models::{
    DecodeAs, FlushResponse, HealthResponse, PageQuery, PageResponse, RetrieveQuery,
    RetrieveResponse, RetrievedValue, StatsResponse, StoreRequest, StoreResponse,
};
use crate::store::{MemoryStore, StoreClient};
use crate::web::{PageCache, PageFetcher};

/// Application state shared across all handlers.
///
/// The backend is held both concretely (for statistics) and as the store
/// contract the services run against. Stores submitted through the API go
/// through the instrumented operation, so every call is counted and recorded.
#[derive(Clone)]
pub struct AppState {
    /// The in-memory backend
    pub backend: Arc<MemoryStore>,
    /// Typed cache over the backend
    pub cache: Arc<TypedCache>,
    /// The doubly-wrapped store operation
    pub store_op: Arc<CountCalls<RecordHistory<StoreValueOp>>>,
    /// Page cache service
    pub pages: Arc<PageCache>,
}

impl AppState {
    /// Builds the full application state over a backend, flushing it.
    pub async fn initialize(
        backend: Arc<MemoryStore>,
        fetcher: Arc<dyn PageFetcher>,
        page_ttl: u64,
    ) -> Result<Self> {
        let store: Arc<dyn StoreClient> = backend.clone();
        let cache = Arc::new(TypedCache::initialize(store.clone()).await?);
        let store_op = Arc::new(instrumented_store(cache.clone()));
        let pages = Arc::new(PageCache::new(store, fetcher, page_ttl));

        Ok(Self {
            backend,
            cache,
            store_op,
            pages,
        })
    }
}

/// Handler for PUT /store
///
/// Stores a typed scalar value through the instrumented store operation and
/// returns the generated key.
pub async fn store_handler(
    State(state): State<AppState>,
    Json(req): Json<StoreRequest>,
) -> Result<Json<StoreResponse>> {
    let key = state.store_op.call(req.value).await?;
    Ok(Json(StoreResponse::new(key.as_str())))
}

/// Handler for GET /retrieve/:key
///
/// Retrieves a value by key with the requested decoding. An unknown key is a
/// 404; a value that does not decode as requested is a 422.
pub async fn retrieve_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(query): Query<RetrieveQuery>,
) -> Result<Json<RetrieveResponse>> {
    let key = Key::from(key);

    let value = match query.decode_as {
        DecodeAs::Raw => state.cache.retrieve(&key).await?.map(RetrievedValue::Raw),
        DecodeAs::Text => state
            .cache
            .retrieve_text(&key)
            .await?
            .map(RetrievedValue::Text),
        DecodeAs::Integer => state
            .cache
            .retrieve_int(&key)
            .await?
            .map(RetrievedValue::Integer),
    };

    let value = value.ok_or_else(|| CacheError::NotFound(key.to_string()))?;
    Ok(Json(RetrieveResponse::new(key.as_str(), value)))
}

/// Handler for GET /page
///
/// Fetches a URL through the page cache and reports the current access count.
pub async fn page_handler(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageResponse>> {
    if let Some(error_msg) = query.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let content = state.pages.get_cached_page(&query.url).await?;
    let access_count = state.pages.access_count(&query.url).await?;

    Ok(Json(PageResponse::new(query.url, content, access_count)))
}

/// Handler for GET /calls
///
/// Returns the replay report for the instrumented store operation.
pub async fn calls_handler(State(state): State<AppState>) -> Result<Json<CallReport>> {
    let report = replay(state.backend.as_ref(), &STORE_IDENTITY).await?;
    Ok(Json(report))
}

/// Handler for GET /stats
///
/// Returns current backend statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.backend.stats().await;

    Json(StatsResponse::new(
        stats.hits,
        stats.misses,
        stats.purged,
        stats.total_keys,
    ))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Handler for POST /flush
///
/// Deletes every entry, counter, and history list.
pub async fn flush_handler(State(state): State<AppState>) -> Result<Json<FlushResponse>> {
    state.cache.store_client().flushdb().await?;
    Ok(Json(FlushResponse::new()))
}
