//! API Module
//!
//! HTTP handlers and routing for the caching layer REST API.
//!
//! # Endpoints
//! - `PUT /store` - Store a typed scalar value, returns the generated key
//! - `GET /retrieve/:key` - Retrieve a value by key (`?as=text|integer|raw`)
//! - `GET /page` - Fetch a URL through the page cache (`?url=...`)
//! - `GET /calls` - Replay report for the instrumented store operation
//! - `GET /stats` - Backend statistics
//! - `GET /health` - Health check endpoint
//! - `POST /flush` - Delete all entries

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
