//! Store Statistics Module
//!
//! Tracks backend performance metrics including hits, misses, and purged entries.

use serde::Serialize;

// == Store Stats ==
/// Tracks in-memory backend performance metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StoreStats {
    /// Number of successful `get` retrievals
    pub hits: u64,
    /// Number of failed `get` retrievals (key absent or expired)
    pub misses: u64,
    /// Number of expired entries removed
    pub purged: u64,
    /// Current number of live keys in the store
    pub total_keys: usize,
}

impl StoreStats {
    // == Constructor ==
    /// Creates a new StoreStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the retrieval hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no retrievals have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Purged ==
    /// Adds to the purged-entry counter.
    pub fn record_purged(&mut self, count: u64) {
        self.purged += count;
    }

    // == Update Key Count ==
    /// Updates the live key count.
    pub fn set_total_keys(&mut self, count: usize) {
        self.total_keys = count;
    }
}
