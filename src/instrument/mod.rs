//! Instrumentation Module
//!
//! Generic wrapper protocol for decorating operations with call counting and
//! call-history recording. Wrappers delegate to an inner operation and keep
//! all recorded state in the backing store, namespaced by the operation's
//! identity.

mod identity;
mod operation;
mod render;
mod replay;

// Re-export public types
pub use identity::OperationIdentity;
pub use operation::{count_calls, record_history, CountCalls, Operation, RecordHistory};
pub use render::CanonicalText;
pub use replay::{replay, CallRecord, CallReport};
