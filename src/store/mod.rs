//! Store Module
//!
//! The backing key-value store contract and the bundled in-memory backend
//! with TTL expiration.

mod client;
mod entry;
mod memory;
mod stats;

// Re-export public types
pub use client::StoreClient;
pub use entry::{current_timestamp_ms, StoreEntry, StoreValue};
pub use memory::MemoryStore;
pub use stats::StoreStats;
