//! Tracked Cache - a typed key-value caching layer
//!
//! Stores typed scalar values under generated keys, instruments the store
//! operation with call counting and call history, and caches fetched web
//! pages with a fixed TTL.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod instrument;
pub mod models;
pub mod store;
pub mod tasks;
pub mod web;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_cleanup_task;
