//! Tasks Module
//!
//! Background tasks for the caching layer.

mod cleanup;

pub use cleanup::spawn_cleanup_task;
