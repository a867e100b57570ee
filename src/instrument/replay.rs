//! Replay Module
//!
//! Read-only assembly of an operation's recorded instrumentation: the call
//! counter plus the paired input/output history.

use serde::Serialize;

use crate::error::Result;
use crate::instrument::OperationIdentity;
use crate::store::StoreClient;

// == Call Record ==
/// One recorded invocation: the rendered input and, when the call completed,
/// the rendered output.
#[derive(Debug, Clone, Serialize)]
pub struct CallRecord {
    /// Rendered arguments of the invocation
    pub input: String,
    /// Rendered result, None when the call failed
    pub output: Option<String>,
}

// == Call Report ==
/// The full recorded state of a decorated operation.
#[derive(Debug, Clone, Serialize)]
pub struct CallReport {
    /// Qualified operation name
    pub operation: String,
    /// Total invocation count
    pub calls: i64,
    /// Recorded invocations, in call order
    pub records: Vec<CallRecord>,
}

// == Replay ==
/// Reads the counter and history lists for `identity` and pairs them up.
///
/// A trailing input without a matching output marks a call that failed
/// between recording its input and completing. Does not mutate any
/// instrumentation state.
pub async fn replay(store: &dyn StoreClient, identity: &OperationIdentity) -> Result<CallReport> {
    let calls = match store.get(&identity.counter_key()).await? {
        Some(bytes) => String::from_utf8(bytes)?.parse()?,
        None => 0,
    };

    let inputs = store.lrange(&identity.inputs_key(), 0, -1).await?;
    let outputs = store.lrange(&identity.outputs_key(), 0, -1).await?;

    let records = inputs
        .into_iter()
        .enumerate()
        .map(|(i, input)| CallRecord {
            input,
            output: outputs.get(i).cloned(),
        })
        .collect();

    Ok(CallReport {
        operation: identity.qualified(),
        calls,
        records,
    })
}
