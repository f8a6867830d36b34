use thiserror::Error;

/// Errors from the key-value storage capability.
///
/// Absence of a key is not an error: `get` returns `Ok(None)`. These
/// variants cover the transport and backend failing outright; they are
/// passed through to callers unmodified, and retry or backoff policy
/// belongs to the transport collaborator, not here.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The store transport failed or timed out.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The backend reported a failure for an individual operation.
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
