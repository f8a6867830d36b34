use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use basalt_codec::{decode_coin_set, encode_coin_set};
use basalt_store::KvStore;
use basalt_types::{CoinReference, UInt160};
use tracing::debug;

use crate::error::ChainDataResult;
use crate::keys::DataEntry;
use crate::shutdown::{race_store, Shutdown};

/// Which per-address coin index an operation targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IndexKind {
    /// Outputs known to be settled and spendable.
    Confirmed,
    /// Outputs eligible for a claim operation.
    Claimable,
}

impl IndexKind {
    fn entry(self, address: UInt160) -> DataEntry {
        match self {
            Self::Confirmed => DataEntry::ConfirmedIndex(address),
            Self::Claimable => DataEntry::ClaimableIndex(address),
        }
    }
}

/// Per-address sets of coin references, stored whole under one key each.
///
/// `set` is a whole-value replace, not an incremental patch. The
/// [`insert`](Self::insert) and [`remove`](Self::remove) helpers run the
/// read-modify-write cycle under an internal per-(kind, address) async lock,
/// so concurrent mutations through the same `UtxoIndex` cannot lose updates.
/// The lock does not reach across instances or raw `get`/`set` callers;
/// writers bypassing the helpers must serialize per address themselves.
/// Lock entries are evicted once no task holds or awaits them, so the lock
/// map is bounded by the number of in-flight mutations, not by the number
/// of addresses ever touched.
///
/// An address with no stored entry and an address with a stored empty set
/// both read as the empty set.
pub struct UtxoIndex<S> {
    store: Arc<S>,
    shutdown: Option<Shutdown>,
    locks: Mutex<HashMap<(IndexKind, UInt160), Arc<tokio::sync::Mutex<()>>>>,
}

impl<S: KvStore> UtxoIndex<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            shutdown: None,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Like [`new`](Self::new), with every store round trip racing the given
    /// shutdown signal.
    pub fn with_shutdown(store: Arc<S>, shutdown: Shutdown) -> Self {
        Self {
            store,
            shutdown: Some(shutdown),
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// The coin references indexed for `address`, empty if never written.
    pub async fn get(
        &self,
        kind: IndexKind,
        address: UInt160,
    ) -> ChainDataResult<HashSet<CoinReference>> {
        let key = kind.entry(address).key();
        let bytes = race_store(self.shutdown.as_ref(), self.store.get(&key)).await?;
        match bytes {
            None => Ok(HashSet::new()),
            Some(bytes) => Ok(decode_coin_set(&bytes)?),
        }
    }

    /// Replace the whole indexed set for `address`.
    pub async fn set(
        &self,
        kind: IndexKind,
        address: UInt160,
        coins: &HashSet<CoinReference>,
    ) -> ChainDataResult<()> {
        let key = kind.entry(address).key();
        race_store(self.shutdown.as_ref(), self.store.put(&key, encode_coin_set(coins)))
            .await?;
        debug!(%key, count = coins.len(), "index entry replaced");
        Ok(())
    }

    /// Add one coin reference. Returns `true` if it was not already present.
    ///
    /// Skips the write when nothing changed, so a repeated insert costs one
    /// round trip.
    pub async fn insert(
        &self,
        kind: IndexKind,
        address: UInt160,
        coin: CoinReference,
    ) -> ChainDataResult<bool> {
        let guard = self.lock(kind, address).await;
        let result = async {
            let mut coins = self.get(kind, address).await?;
            if !coins.insert(coin) {
                return Ok(false);
            }
            self.set(kind, address, &coins).await?;
            Ok(true)
        }
        .await;
        drop(guard);
        self.evict_idle_lock(kind, address);
        result
    }

    /// Remove one coin reference. Returns `true` if it was present.
    pub async fn remove(
        &self,
        kind: IndexKind,
        address: UInt160,
        coin: &CoinReference,
    ) -> ChainDataResult<bool> {
        let guard = self.lock(kind, address).await;
        let result = async {
            let mut coins = self.get(kind, address).await?;
            if !coins.remove(coin) {
                return Ok(false);
            }
            self.set(kind, address, &coins).await?;
            Ok(true)
        }
        .await;
        drop(guard);
        self.evict_idle_lock(kind, address);
        result
    }

    async fn lock(&self, kind: IndexKind, address: UInt160) -> tokio::sync::OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().expect("lock poisoned");
            Arc::clone(
                locks
                    .entry((kind, address))
                    .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(()))),
            )
        };
        lock.lock_owned().await
    }

    /// Drop the lock entry once no task holds or awaits it.
    ///
    /// Clones are only handed out under the map mutex, so a strong count of
    /// one (the map's own `Arc`) cannot race with a waiter acquiring the
    /// same entry.
    fn evict_idle_lock(&self, kind: IndexKind, address: UInt160) {
        let mut locks = self.locks.lock().expect("lock poisoned");
        if let Some(lock) = locks.get(&(kind, address)) {
            if Arc::strong_count(lock) == 1 {
                locks.remove(&(kind, address));
            }
        }
    }
}
