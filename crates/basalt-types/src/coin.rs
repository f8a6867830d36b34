use std::fmt;

use serde::{Deserialize, Serialize};

use crate::hash::UInt256;

/// Reference to a specific previous transaction output.
///
/// Identifies an output by the hash of its containing transaction and the
/// output's position within that transaction. Equality and hashing are
/// structural over both fields, so a `HashSet<CoinReference>` deduplicates
/// references to the same output.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CoinReference {
    /// Hash of the transaction containing the referenced output.
    pub prev_hash: UInt256,
    /// Index of the output within that transaction.
    pub prev_index: u16,
}

impl CoinReference {
    pub fn new(prev_hash: UInt256, prev_index: u16) -> Self {
        Self {
            prev_hash,
            prev_index,
        }
    }
}

impl fmt::Debug for CoinReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CoinReference({:?}:{})", self.prev_hash, self.prev_index)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn equality_is_structural() {
        let hash = UInt256::random();
        assert_eq!(CoinReference::new(hash, 3), CoinReference::new(hash, 3));
        assert_ne!(CoinReference::new(hash, 3), CoinReference::new(hash, 4));
        assert_ne!(
            CoinReference::new(hash, 3),
            CoinReference::new(UInt256::random(), 3)
        );
    }

    #[test]
    fn set_deduplicates_structural_duplicates() {
        let hash = UInt256::random();
        let mut set = HashSet::new();
        set.insert(CoinReference::new(hash, 0));
        set.insert(CoinReference::new(hash, 0));
        set.insert(CoinReference::new(hash, 1));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn same_hash_different_index_are_distinct() {
        let hash = UInt256::random();
        let set: HashSet<_> = (0u16..4).map(|i| CoinReference::new(hash, i)).collect();
        assert_eq!(set.len(), 4);
    }
}
