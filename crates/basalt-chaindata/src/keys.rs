//! The key builder: a pure mapping from logical entities to storage keys.
//!
//! Every persisted entity is named by a [`DataEntry`]. System counters map
//! to fixed names; per-address index entries append the address's canonical
//! hex form to a fixed prefix. Fixed prefixes plus the fixed-width
//! disambiguator make the mapping injective: no two distinct logical
//! entities ever produce the same key.

use basalt_store::StoreKey;
use basalt_types::UInt160;

/// The closed set of persisted entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DataEntry {
    /// The stored node version string.
    Version,
    /// Height of the latest fully stored block.
    CurrentBlockHeight,
    /// Height of the latest stored block header.
    CurrentHeaderHeight,
    /// Height up to which the per-address indices have been built.
    IndexHeight,
    /// Confirmed (spendable) outputs owned by an address.
    ConfirmedIndex(UInt160),
    /// Claimable outputs owned by an address.
    ClaimableIndex(UInt160),
}

impl DataEntry {
    /// The storage key for this entity. Pure and total.
    pub fn key(&self) -> StoreKey {
        match self {
            Self::Version => StoreKey::new("SYS:Version"),
            Self::CurrentBlockHeight => StoreKey::new("SYS:CurrentBlock"),
            Self::CurrentHeaderHeight => StoreKey::new("SYS:CurrentHeader"),
            Self::IndexHeight => StoreKey::new("IX:Height"),
            Self::ConfirmedIndex(address) => {
                StoreKey::new(format!("IX:Confirmed:{}", address.to_hex()))
            }
            Self::ClaimableIndex(address) => {
                StoreKey::new(format!("IX:Claimable:{}", address.to_hex()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn system_keys_are_fixed() {
        assert_eq!(DataEntry::Version.key().as_str(), "SYS:Version");
        assert_eq!(DataEntry::CurrentBlockHeight.key().as_str(), "SYS:CurrentBlock");
        assert_eq!(DataEntry::CurrentHeaderHeight.key().as_str(), "SYS:CurrentHeader");
        assert_eq!(DataEntry::IndexHeight.key().as_str(), "IX:Height");
    }

    #[test]
    fn index_keys_embed_the_address() {
        let address = UInt160::from_raw([0xAB; 20]);
        let key = DataEntry::ConfirmedIndex(address).key();
        assert_eq!(key.as_str(), format!("IX:Confirmed:{}", "ab".repeat(20)));
    }

    #[test]
    fn keys_are_deterministic() {
        let address = UInt160::random();
        assert_eq!(
            DataEntry::ClaimableIndex(address).key(),
            DataEntry::ClaimableIndex(address).key()
        );
    }

    #[test]
    fn distinct_entities_never_collide() {
        let addresses = [
            UInt160::zero(),
            UInt160::from_raw([1; 20]),
            UInt160::from_raw([2; 20]),
        ];
        let mut entries = vec![
            DataEntry::Version,
            DataEntry::CurrentBlockHeight,
            DataEntry::CurrentHeaderHeight,
            DataEntry::IndexHeight,
        ];
        for address in addresses {
            entries.push(DataEntry::ConfirmedIndex(address));
            entries.push(DataEntry::ClaimableIndex(address));
        }

        let keys: HashSet<StoreKey> = entries.iter().map(DataEntry::key).collect();
        assert_eq!(keys.len(), entries.len());
    }

    #[test]
    fn confirmed_and_claimable_differ_for_same_address() {
        let address = UInt160::random();
        assert_ne!(
            DataEntry::ConfirmedIndex(address).key(),
            DataEntry::ClaimableIndex(address).key()
        );
    }
}
