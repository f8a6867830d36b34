use thiserror::Error;

/// Errors from binary encoding and decoding.
///
/// Decode failures are always surfaced to the caller, never recovered
/// silently: accepting malformed chain state risks consensus divergence.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// The input ended before the declared data was fully read.
    #[error("truncated input")]
    TruncatedInput,

    /// A declared length cannot fit in the remaining input.
    #[error("invalid length: declared {declared} with {remaining} bytes remaining")]
    InvalidLength { declared: u64, remaining: usize },

    /// A boolean byte was neither 0 nor 1.
    #[error("invalid boolean encoding: {0:#04x}")]
    InvalidBooleanEncoding(u8),

    /// A length-prefixed string was not valid UTF-8.
    #[error("invalid UTF-8 in string field")]
    InvalidUtf8,

    /// A variable-length integer used a longer encoding than its value needs.
    #[error("non-canonical variable-length integer")]
    NonCanonicalVarInt,

    /// A variable-length integer exceeds the width the caller can accept.
    #[error("variable-length integer out of range: {0}")]
    VarIntOutOfRange(u64),

    /// A field value did not match the encoding its schema declares.
    #[error("schema mismatch: expected {expected}, got {actual}")]
    SchemaMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// Input bytes remained after the record was fully decoded.
    #[error("{0} trailing bytes after record")]
    TrailingBytes(usize),
}

/// Result alias for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
