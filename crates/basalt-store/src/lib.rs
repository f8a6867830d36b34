//! Key-value storage capability for the basalt chain core.
//!
//! The chain data repository is built on the narrowest storage contract a
//! backend can offer: asynchronous single-key `get` and `put`, nothing else.
//! Concrete backends (a networked database, an embedded store) implement
//! [`KvStore`]; this crate ships [`MemoryKvStore`] for tests and embedding.
//!
//! No ordering is guaranteed across different keys. Anything needing
//! cross-key consistency must be rebuilt by the caller after a crash.

pub mod error;
pub mod key;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use key::StoreKey;
pub use memory::MemoryKvStore;
pub use traits::KvStore;
