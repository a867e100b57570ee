//! API Routes
//!
//! Configures the Axum router with all caching layer endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    calls_handler, flush_handler, health_handler, page_handler, retrieve_handler, stats_handler,
    store_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /store` - Store a typed scalar value
/// - `GET /retrieve/:key` - Retrieve a value by key (`?as=text|integer|raw`)
/// - `GET /page` - Fetch a URL through the page cache (`?url=...`)
/// - `GET /calls` - Replay report for the instrumented store operation
/// - `GET /stats` - Backend statistics
/// - `GET /health` - Health check endpoint
/// - `POST /flush` - Delete all entries
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router with all endpoints
    Router::new()
        .route("/store", put(store_handler))
        .route("/retrieve/:key", get(retrieve_handler))
        .route("/page", get(page_handler))
        .route("/calls", get(calls_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .route("/flush", post(flush_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
