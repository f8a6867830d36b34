use std::sync::Arc;

use basalt_codec::{ByteReader, ByteWriter, CodecError};
use basalt_store::KvStore;
use tracing::debug;

use crate::error::ChainDataResult;
use crate::keys::DataEntry;
use crate::shutdown::{race_store, Shutdown};

/// Typed access to the chain's system counters and version string.
///
/// Every operation issues exactly one store round trip and carries no
/// internal concurrency. Counters that have never been written read as zero;
/// the version reads as `None` until first set, which is distinct from an
/// empty string. Writes overwrite unconditionally — last writer wins.
///
/// Counter writes and index writes go to independent keys, so a crash
/// between them can leave the two inconsistent; the chain-sync collaborator
/// is responsible for re-deriving indices from chain height on restart.
pub struct ChainRepository<S> {
    store: Arc<S>,
    shutdown: Option<Shutdown>,
}

impl<S: KvStore> ChainRepository<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            shutdown: None,
        }
    }

    /// Like [`new`](Self::new), with every operation racing the given
    /// shutdown signal.
    pub fn with_shutdown(store: Arc<S>, shutdown: Shutdown) -> Self {
        Self {
            store,
            shutdown: Some(shutdown),
        }
    }

    /// Height of the latest fully stored block, zero if never written.
    pub async fn total_block_height(&self) -> ChainDataResult<u32> {
        self.counter(DataEntry::CurrentBlockHeight).await
    }

    pub async fn set_total_block_height(&self, height: u32) -> ChainDataResult<()> {
        self.set_counter(DataEntry::CurrentBlockHeight, height).await
    }

    /// Height of the latest stored block header, zero if never written.
    pub async fn total_block_header_height(&self) -> ChainDataResult<u32> {
        self.counter(DataEntry::CurrentHeaderHeight).await
    }

    pub async fn set_total_block_header_height(&self, height: u32) -> ChainDataResult<()> {
        self.set_counter(DataEntry::CurrentHeaderHeight, height).await
    }

    /// Height up to which the per-address indices have been built, zero if
    /// never written. Advanced only by the chain-sync collaborator.
    pub async fn index_height(&self) -> ChainDataResult<u32> {
        self.counter(DataEntry::IndexHeight).await
    }

    pub async fn set_index_height(&self, height: u32) -> ChainDataResult<()> {
        self.set_counter(DataEntry::IndexHeight, height).await
    }

    /// The stored version string, or `None` if it was never set.
    ///
    /// Stored as raw UTF-8, not through the record codec, so an empty string
    /// round-trips as `Some("")` and stays distinguishable from unset.
    pub async fn version(&self) -> ChainDataResult<Option<String>> {
        let key = DataEntry::Version.key();
        let bytes = race_store(self.shutdown.as_ref(), self.store.get(&key)).await?;
        match bytes {
            None => Ok(None),
            Some(bytes) => {
                let value = String::from_utf8(bytes).map_err(|_| CodecError::InvalidUtf8)?;
                Ok(Some(value))
            }
        }
    }

    pub async fn set_version(&self, version: &str) -> ChainDataResult<()> {
        let key = DataEntry::Version.key();
        race_store(
            self.shutdown.as_ref(),
            self.store.put(&key, version.as_bytes().to_vec()),
        )
        .await?;
        debug!(%key, version, "version updated");
        Ok(())
    }

    async fn counter(&self, entry: DataEntry) -> ChainDataResult<u32> {
        let key = entry.key();
        let bytes = race_store(self.shutdown.as_ref(), self.store.get(&key)).await?;
        match bytes {
            // Absence is semantically zero, never an error.
            None => Ok(0),
            Some(bytes) => Ok(decode_counter(&bytes)?),
        }
    }

    async fn set_counter(&self, entry: DataEntry, value: u32) -> ChainDataResult<()> {
        let key = entry.key();
        let mut w = ByteWriter::with_capacity(4);
        w.put_u32_le(value);
        race_store(self.shutdown.as_ref(), self.store.put(&key, w.into_bytes())).await?;
        debug!(%key, value, "counter updated");
        Ok(())
    }
}

/// A stored counter must be exactly four little-endian bytes.
fn decode_counter(bytes: &[u8]) -> Result<u32, CodecError> {
    let mut r = ByteReader::new(bytes);
    let value = r.get_u32_le()?;
    if !r.is_empty() {
        return Err(CodecError::TrailingBytes(r.remaining()));
    }
    Ok(value)
}
