//! Schema-driven binary codec for the basalt chain core.
//!
//! One codec serves both the peer-to-peer wire layer and the on-disk state
//! repository, so every registered record type must encode and decode
//! byte-exactly and symmetrically.
//!
//! # Layers
//!
//! - [`ByteWriter`] / [`ByteReader`] — checked primitive encoding: fixed
//!   little-endian integers, single-byte booleans, compact var-ints, and
//!   length-prefixed UTF-8 strings
//! - [`Record`] + [`Schema`] — declarative per-type field layouts consumed
//!   by one generic traversal ([`encode_record`] / [`decode_record`])
//!
//! # The round-trip law
//!
//! For every record type `R` and valid value `v`,
//! `decode_record::<R>(&encode_record(&v)?)? == v` under structural
//! equality. Decode failures ([`CodecError`]) are always surfaced, never
//! recovered silently.

pub mod error;
pub mod reader;
pub mod schema;
pub mod writer;

pub use error::{CodecError, CodecResult};
pub use reader::ByteReader;
pub use schema::{
    decode_coin_set, decode_record, decode_record_from, encode_coin_set, encode_record,
    encode_record_into, FieldEncoding, FieldValue, Record, Schema,
};
pub use writer::ByteWriter;
