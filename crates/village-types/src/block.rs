use serde::{Deserialize, Serialize};

use crate::hash::BlockHash;
use crate::temporal::Timestamp;

/// A payload type that can be carried by a chain.
///
/// Chains treat payloads as opaque: they only need a canonical serialized
/// form for hashing and the fixed label stored in the genesis block.
pub trait ChainPayload: Serialize + Clone {
    /// Payload stored in the genesis block.
    fn genesis() -> Self;
}

/// One entry in a hash-linked chain.
///
/// `hash` is the digest of (`index`, `previous_hash`, `timestamp`,
/// `payload`) in that order. A block is fully formed before it enters a
/// chain and is never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block<P> {
    /// Position in the chain, 0 for genesis.
    pub index: u64,
    /// Hash of the preceding block, or the zero sentinel for genesis.
    pub previous_hash: BlockHash,
    pub timestamp: Timestamp,
    pub payload: P,
    pub hash: BlockHash,
}

impl<P> Block<P> {
    pub fn new(
        index: u64,
        previous_hash: BlockHash,
        timestamp: Timestamp,
        payload: P,
        hash: BlockHash,
    ) -> Self {
        Self {
            index,
            previous_hash,
            timestamp,
            payload,
            hash,
        }
    }

    /// Returns `true` for index 0.
    pub fn is_genesis(&self) -> bool {
        self.index == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_field_wise() {
        let a = Block::new(
            1,
            BlockHash::zero(),
            Timestamp::from_millis(10),
            "data".to_string(),
            BlockHash::from_bytes([1; 32]),
        );
        let mut b = a.clone();
        assert_eq!(a, b);

        b.payload = "other".into();
        assert_ne!(a, b);
    }

    #[test]
    fn genesis_detection() {
        let g = Block::new(0, BlockHash::zero(), Timestamp::from_millis(0), (), BlockHash::zero());
        assert!(g.is_genesis());
        let b = Block::new(3, BlockHash::zero(), Timestamp::from_millis(0), (), BlockHash::zero());
        assert!(!b.is_genesis());
    }

    #[test]
    fn serde_keeps_every_field() {
        let block = Block::new(
            2,
            BlockHash::from_bytes([2; 32]),
            Timestamp::from_millis(99),
            42u32,
            BlockHash::from_bytes([3; 32]),
        );
        let json = serde_json::to_string(&block).unwrap();
        let parsed: Block<u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, block);
    }
}
