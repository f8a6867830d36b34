use basalt_codec::CodecError;
use basalt_store::StoreError;
use thiserror::Error;

/// Errors from chain data operations.
///
/// Key absence is never represented here: counters default to zero, the
/// version to unset, and indices to the empty set. Everything else is
/// surfaced — store failures pass through unmodified and decode failures are
/// fatal to the calling operation, never retried or absorbed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChainDataError {
    /// The underlying key-value store failed; passed through unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Stored or incoming bytes were malformed.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The caller's shutdown signal fired before the store acknowledged.
    #[error("operation cancelled")]
    Cancelled,
}

/// Result alias for chain data operations.
pub type ChainDataResult<T> = Result<T, ChainDataError>;
