use async_trait::async_trait;

use crate::error::StoreResult;
use crate::key::StoreKey;

/// Byte-oriented key-value storage with single-key get and put only.
///
/// This is deliberately the narrowest storage contract the chain data layer
/// can be built on: no range queries, no transactions, no atomic increment.
/// Implementations must satisfy:
///
/// - Absence is `Ok(None)` from `get`, never an error.
/// - `put` replaces the whole value; a put either fully lands or does not
///   happen, with no partial-byte writes.
/// - Once `put` to key K is acknowledged, a subsequent `get` of K from any
///   caller observes it. No ordering is promised across different keys.
/// - I/O failures are propagated, never silently ignored, and never retried
///   here.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Fetch the value stored under `key`, or `None` if the key is absent.
    async fn get(&self, key: &StoreKey) -> StoreResult<Option<Vec<u8>>>;

    /// Store `value` under `key`, unconditionally overwriting any prior
    /// value.
    async fn put(&self, key: &StoreKey, value: Vec<u8>) -> StoreResult<()>;
}
