//! Operation Wrappers
//!
//! The wrapper protocol itself: an `Operation` is anything callable with
//! typed arguments and a typed result, and a wrapper is an `Operation` that
//! records a side effect in the store and delegates to an inner `Operation`.
//! Wrappers compose by construction; persistent state lives only in the
//! store, never in the wrapper values.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::instrument::{CanonicalText, OperationIdentity};
use crate::store::StoreClient;

// == Operation Trait ==
/// A callable operation with typed arguments and result.
#[async_trait]
pub trait Operation<A, R>: Send + Sync
where
    A: Send + 'static,
    R: Send + 'static,
{
    async fn call(&self, args: A) -> Result<R>;
}

// == Counting Wrapper ==
/// Wrapper that counts invocations of the inner operation.
///
/// The counter lives at the identity's counter key and is incremented
/// atomically once per call, before delegation, so it reflects the
/// invocation even when the inner operation fails.
pub struct CountCalls<Op> {
    identity: OperationIdentity,
    store: Arc<dyn StoreClient>,
    inner: Op,
}

/// Wraps `inner` with call counting under `identity`.
pub fn count_calls<Op>(
    identity: OperationIdentity,
    store: Arc<dyn StoreClient>,
    inner: Op,
) -> CountCalls<Op> {
    CountCalls {
        identity,
        store,
        inner,
    }
}

#[async_trait]
impl<A, R, Op> Operation<A, R> for CountCalls<Op>
where
    A: Send + 'static,
    R: Send + 'static,
    Op: Operation<A, R>,
{
    async fn call(&self, args: A) -> Result<R> {
        self.store.incr(&self.identity.counter_key()).await?;
        self.inner.call(args).await
    }
}

// == History Wrapper ==
/// Wrapper that records the inputs and outputs of the inner operation.
///
/// Arguments are rendered through [`CanonicalText`] and appended to the
/// `:inputs` list before delegation; the result is rendered and appended to
/// `:outputs` only after the inner operation completes successfully. A
/// failed call therefore leaves the lists one entry apart, which is the
/// intended failure signal. The caller always receives the original,
/// non-rendered result.
pub struct RecordHistory<Op> {
    identity: OperationIdentity,
    store: Arc<dyn StoreClient>,
    inner: Op,
}

/// Wraps `inner` with input/output history recording under `identity`.
pub fn record_history<Op>(
    identity: OperationIdentity,
    store: Arc<dyn StoreClient>,
    inner: Op,
) -> RecordHistory<Op> {
    RecordHistory {
        identity,
        store,
        inner,
    }
}

#[async_trait]
impl<A, R, Op> Operation<A, R> for RecordHistory<Op>
where
    A: CanonicalText + Send + 'static,
    R: CanonicalText + Send + 'static,
    Op: Operation<A, R>,
{
    async fn call(&self, args: A) -> Result<R> {
        let rendered = args.canonical_text();
        self.store
            .rpush(&self.identity.inputs_key(), &rendered)
            .await?;

        let result = self.inner.call(args).await?;

        self.store
            .rpush(&self.identity.outputs_key(), &result.canonical_text())
            .await?;
        Ok(result)
    }
}
