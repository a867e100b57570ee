//! TTL Cleanup Task
//!
//! Background task that periodically removes expired store entries, keeping
//! the backend from accumulating dead page-cache content between reads.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::store::MemoryStore;

/// Spawns a background task that periodically purges expired store entries.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between sweeps.
///
/// # Arguments
/// * `store` - Shared reference to the in-memory backend
/// * `cleanup_interval_secs` - Interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
pub fn spawn_cleanup_task(store: Arc<MemoryStore>, cleanup_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting TTL cleanup task with interval of {} seconds",
            cleanup_interval_secs
        );

        loop {
            // Sleep for the configured interval
            tokio::time::sleep(interval).await;

            let removed = store.purge_expired().await;

            // Log cleanup statistics
            if removed > 0 {
                info!("TTL cleanup: removed {} expired entries", removed);
            } else {
                debug!("TTL cleanup: no expired entries found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreClient;
    use std::time::Duration;

    #[tokio::test]
    async fn test_cleanup_task_removes_expired_entries() {
        let store = Arc::new(MemoryStore::new());

        // Add an entry with very short TTL
        store.setex("expire_soon", 1, b"value").await.unwrap();

        // Spawn cleanup task with 1 second interval
        let handle = spawn_cleanup_task(store.clone(), 1);

        // Wait for entry to expire and cleanup to run
        tokio::time::sleep(Duration::from_millis(2500)).await;

        // Verify entry was removed outright, not just hidden from reads
        assert_eq!(store.len().await, 0);

        // Abort the cleanup task
        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_preserves_valid_entries() {
        let store = Arc::new(MemoryStore::new());

        // Add an entry with long TTL
        store.setex("long_lived", 3600, b"value").await.unwrap();

        // Spawn cleanup task
        let handle = spawn_cleanup_task(store.clone(), 1);

        // Wait for cleanup to run
        tokio::time::sleep(Duration::from_millis(1500)).await;

        // Verify entry still exists
        let value = store.get("long_lived").await.unwrap();
        assert_eq!(value, Some(b"value".to_vec()));

        // Abort the cleanup task
        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_can_be_aborted() {
        let store = Arc::new(MemoryStore::new());

        let handle = spawn_cleanup_task(store, 1);

        // Abort immediately
        handle.abort();

        // Wait a bit and verify task is finished
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
