use basalt_codec::CodecError;
use thiserror::Error;

use crate::command::Command;

/// Errors from wire message framing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WireError {
    /// The command field named no registered command.
    #[error("unknown command: {0:?}")]
    UnknownCommand(String),

    /// The command field was not zero-padded ASCII.
    #[error("invalid command encoding")]
    InvalidCommandEncoding,

    /// The declared payload exceeds the protocol maximum.
    #[error("payload too large: {size} bytes (max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// The message carried a different command than the payload type expects.
    #[error("unexpected command: expected {expected}, got {actual}")]
    UnexpectedCommand { expected: Command, actual: Command },

    /// Payload bytes failed to encode or decode.
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Result alias for wire operations.
pub type WireResult<T> = Result<T, WireError>;
