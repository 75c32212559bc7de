//! Engine and store error types

use std::fmt;

use reclaim_api::GatewayError;
use thiserror::Error;

/// Failure persisting the local store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Which remote call a mutation tried to mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorOperation {
    Create,
    Replace,
    Delete,
}

impl fmt::Display for MirrorOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MirrorOperation::Create => write!(f, "create"),
            MirrorOperation::Replace => write!(f, "replace"),
            MirrorOperation::Delete => write!(f, "delete"),
        }
    }
}

/// Outcome of a reconciliation cycle or mirrored mutation.
///
/// Reconciliation errors cover the whole cycle; there is no
/// partial-success reporting. Mirror errors are surfaced per operation and
/// never reverse the already-applied local mutation.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The remote snapshot fetch failed; the cycle aborted with no local
    /// side effects.
    #[error("remote snapshot fetch failed: {0}")]
    Fetch(#[source] GatewayError),

    /// The remote snapshot could not be parsed. A partially decoded
    /// snapshot cannot be trusted, so this aborts the cycle the same way a
    /// fetch failure does.
    #[error("remote snapshot could not be decoded: {0}")]
    Decode(#[source] GatewayError),

    /// The durable write failed after in-memory mutations were applied.
    /// The mutations are not rolled back.
    #[error("local commit failed: {0}")]
    Commit(#[source] StoreError),

    /// The best-effort remote call after a local mutation failed. The
    /// local mutation stands; the caller may re-trigger the mutation or a
    /// full reconcile.
    #[error("remote {operation} failed after local mutation: {source}")]
    RemoteMirror {
        operation: MirrorOperation,
        source: GatewayError,
    },

    /// The write path rejected the item before any mutation was applied.
    #[error("invalid item: {message}")]
    Invalid { message: String },
}
