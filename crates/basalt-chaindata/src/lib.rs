//! Chain metadata repository and per-address UTXO indices.
//!
//! This crate owns the persisted chain state of a basalt node: the system
//! counters (block height, header height, index height), the node version
//! string, and the confirmed/claimable coin-reference sets kept per address.
//! It is built on three primitives from the rest of the workspace: the pure
//! key builder ([`DataEntry`]), the binary codec, and the single-key
//! [`KvStore`] capability.
//!
//! # Components
//!
//! - [`DataEntry`] — maps each logical entity to its injective storage key
//! - [`ChainRepository`] — typed get/set for counters and version
//! - [`UtxoIndex`] — whole-value read/write of per-address coin sets, with
//!   locked read-modify-write helpers
//! - [`Shutdown`] — cancellation signal raced against every store round trip
//!
//! The store offers single-key atomicity only, so a counter write and an
//! index write can never be made atomic together here; cross-key recovery
//! after a crash belongs to the chain-sync collaborator.
//!
//! [`KvStore`]: basalt_store::KvStore

pub mod error;
pub mod index;
pub mod keys;
pub mod repository;
pub mod shutdown;

pub use error::{ChainDataError, ChainDataResult};
pub use index::{IndexKind, UtxoIndex};
pub use keys::DataEntry;
pub use repository::ChainRepository;
pub use shutdown::{Shutdown, ShutdownHandle};
