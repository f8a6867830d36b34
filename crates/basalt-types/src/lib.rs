//! Foundation types for the basalt chain core.
//!
//! This crate provides the fixed-width identifier and output-reference types
//! shared by the codec, the wire layer, and the chain data repository. Every
//! other basalt crate depends on `basalt-types`.
//!
//! # Key Types
//!
//! - [`UInt160`] — 20-byte identifier (script hash / address)
//! - [`UInt256`] — 32-byte identifier (transaction or block hash)
//! - [`CoinReference`] — pointer to a specific previous transaction output
//!
//! Hash values are opaque here: they are produced by hashing code elsewhere
//! and this crate only stores, compares, and renders them.

pub mod coin;
pub mod error;
pub mod hash;

pub use coin::CoinReference;
pub use error::TypeError;
pub use hash::{UInt160, UInt256};
