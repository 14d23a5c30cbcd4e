use village_crypto::BlockHasher;
use village_types::{Block, BlockHash, ChainPayload, Timestamp};

use crate::error::ChainError;
use crate::verify::{ChainVerifier, IntegrityViolation};

/// Append-only sequence of hash-linked blocks.
///
/// Always starts with exactly one genesis block and only grows: blocks are
/// never removed, reordered, or mutated once pushed. `append` is the only
/// mutator.
#[derive(Clone, Debug)]
pub struct Chain<P> {
    blocks: Vec<Block<P>>,
}

impl<P: ChainPayload> Chain<P> {
    /// Create a chain holding only its genesis block.
    pub fn new() -> Self {
        Self {
            blocks: vec![Self::genesis_block()],
        }
    }

    /// Build the genesis block: index 0, the zero sentinel as both link
    /// and hash, the payload's genesis label, and the current time.
    pub fn genesis_block() -> Block<P> {
        Block::new(
            0,
            BlockHash::zero(),
            Timestamp::now(),
            P::genesis(),
            BlockHash::zero(),
        )
    }

    /// Rebuild a chain from exported blocks, re-running verification.
    pub fn from_blocks(blocks: Vec<Block<P>>) -> Result<Self, ChainError> {
        if blocks.is_empty() {
            return Err(ChainError::EmptyChain);
        }
        ChainVerifier::verify_blocks(&blocks)?;
        Ok(Self { blocks })
    }

    /// The most recently appended block (genesis for a fresh chain).
    pub fn latest(&self) -> Result<&Block<P>, ChainError> {
        self.blocks.last().ok_or(ChainError::EmptyChain)
    }

    /// Link `payload` to the current tail and push it as a new block.
    ///
    /// On a serialization failure the chain is left unmodified.
    pub fn append(&mut self, payload: P) -> Result<&Block<P>, ChainError> {
        let latest = self.latest()?;
        let index = latest.index + 1;
        let previous_hash = latest.hash;
        let timestamp = Timestamp::at_or_after(latest.timestamp);

        let hash = BlockHasher::BLOCK.digest(index, &previous_hash, timestamp, &payload)?;
        self.blocks
            .push(Block::new(index, previous_hash, timestamp, payload, hash));
        self.latest()
    }

    /// Recompute every link and hash; `true` if the chain is intact.
    pub fn verify(&self) -> bool {
        self.audit().is_ok()
    }

    /// Like [`verify`](Self::verify), but reports where and how the chain
    /// first fails.
    pub fn audit(&self) -> Result<(), IntegrityViolation> {
        ChainVerifier::verify_blocks(&self.blocks)
    }
}

impl<P> Chain<P> {
    /// Number of blocks, genesis included.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Only `true` for a chain that lost its genesis block.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get(&self, index: u64) -> Option<&Block<P>> {
        usize::try_from(index).ok().and_then(|i| self.blocks.get(i))
    }

    pub fn blocks(&self) -> &[Block<P>] {
        &self.blocks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block<P>> {
        self.blocks.iter()
    }

    /// Give up the chain, returning its blocks in index order.
    pub fn into_blocks(self) -> Vec<Block<P>> {
        self.blocks
    }
}

impl<P: ChainPayload> Default for Chain<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, P> IntoIterator for &'a Chain<P> {
    type Item = &'a Block<P>;
    type IntoIter = std::slice::Iter<'a, Block<P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verify::ViolationKind;
    use proptest::prelude::*;
    use serde::{Serialize, Serializer};
    use village_types::{Payload, Transaction};

    fn tx(actor: &str, amount: i64) -> Payload {
        Payload::Transaction(Transaction::new(actor, amount))
    }

    fn chain_with(payloads: &[(&str, i64)]) -> Chain<Payload> {
        let mut chain = Chain::new();
        for (actor, amount) in payloads {
            chain.append(tx(actor, *amount)).unwrap();
        }
        chain
    }

    fn set_amount(block: &mut Block<Payload>, amount: i64) {
        match &mut block.payload {
            Payload::Transaction(t) => t.amount = amount,
            other => panic!("expected transaction payload, got {other:?}"),
        }
    }

    /// Payload that can be told to fail serialization.
    #[derive(Clone, Debug)]
    enum Flaky {
        Label(String),
        Broken,
    }

    impl Serialize for Flaky {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self {
                Self::Label(s) => serializer.serialize_str(s),
                Self::Broken => Err(serde::ser::Error::custom("broken payload")),
            }
        }
    }

    impl ChainPayload for Flaky {
        fn genesis() -> Self {
            Self::Label("genesis".into())
        }
    }

    #[test]
    fn new_chain_has_sentinel_genesis() {
        let chain: Chain<Payload> = Chain::new();
        assert_eq!(chain.len(), 1);
        let genesis = chain.latest().unwrap();
        assert_eq!(genesis.index, 0);
        assert!(genesis.previous_hash.is_zero());
        assert!(genesis.hash.is_zero());
        assert_eq!(genesis.payload, Payload::genesis());
        assert!(chain.verify());
    }

    #[test]
    fn append_links_to_genesis() {
        let mut chain = Chain::new();
        let genesis_hash = chain.latest().unwrap().hash;
        let block = chain.append(tx("alice", 50)).unwrap().clone();

        assert_eq!(block.index, 1);
        assert_eq!(block.previous_hash, genesis_hash);
        assert_eq!(block.payload, tx("alice", 50));
        assert!(!block.hash.is_zero());
        assert_eq!(chain.latest().unwrap(), &block);
        assert!(chain.verify());
    }

    #[test]
    fn stored_hash_matches_independent_digest() {
        let chain = chain_with(&[("alice", 50), ("bob", -20), ("carol", 5)]);
        let block = chain.get(2).unwrap();
        let recomputed = BlockHasher::BLOCK
            .digest(
                block.index,
                &block.previous_hash,
                block.timestamp,
                &block.payload,
            )
            .unwrap();
        assert_eq!(recomputed, block.hash);
    }

    #[test]
    fn tampered_amount_detected_at_its_index() {
        let mut chain = chain_with(&[("alice", 50), ("bob", 10)]);
        assert_eq!(chain.len(), 3);

        set_amount(&mut chain.blocks[1], 5_000);
        assert!(!chain.verify());
        assert_eq!(
            chain.audit().unwrap_err(),
            IntegrityViolation {
                index: 1,
                kind: ViolationKind::HashMismatch
            }
        );
    }

    #[test]
    fn timestamps_never_decrease() {
        let chain = chain_with(&[("a", 1), ("b", 2), ("c", 3), ("d", 4)]);
        for pair in chain.blocks().windows(2) {
            assert!(pair[1].timestamp >= pair[0].timestamp);
        }
    }

    #[test]
    fn serialization_failure_leaves_chain_unchanged() {
        let mut chain: Chain<Flaky> = Chain::new();
        chain.append(Flaky::Label("first".into())).unwrap();

        let err = chain.append(Flaky::Broken).unwrap_err();
        assert!(matches!(err, ChainError::Serialization(msg) if msg.contains("broken payload")));
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.latest().unwrap().index, 1);
        assert!(chain.verify());
    }

    #[test]
    fn latest_on_empty_chain_is_an_error() {
        let mut chain: Chain<Payload> = Chain { blocks: Vec::new() };
        assert!(chain.is_empty());
        assert_eq!(chain.latest().unwrap_err(), ChainError::EmptyChain);
        assert_eq!(chain.append(tx("x", 1)).unwrap_err(), ChainError::EmptyChain);
    }

    #[test]
    fn from_blocks_accepts_exported_chain() {
        let chain = chain_with(&[("alice", 50), ("bob", 10)]);
        let blocks = chain.clone().into_blocks();
        let mut restored = Chain::from_blocks(blocks).unwrap();
        assert_eq!(restored.blocks(), chain.blocks());

        let next = restored.append(tx("carol", 1)).unwrap();
        assert_eq!(next.index, 3);
        assert!(restored.verify());
    }

    #[test]
    fn from_blocks_survives_json_export() {
        let chain = chain_with(&[("alice", 50)]);
        let json = serde_json::to_string(chain.blocks()).unwrap();
        let blocks: Vec<Block<Payload>> = serde_json::from_str(&json).unwrap();
        assert!(Chain::from_blocks(blocks).is_ok());
    }

    #[test]
    fn from_blocks_rejects_corruption() {
        let mut blocks = chain_with(&[("alice", 50), ("bob", 10)]).into_blocks();
        blocks[2].previous_hash = BlockHash::from_bytes([4; 32]);
        let err = Chain::from_blocks(blocks).unwrap_err();
        assert_eq!(
            err,
            ChainError::Integrity(IntegrityViolation {
                index: 2,
                kind: ViolationKind::BrokenLink
            })
        );
    }

    #[test]
    fn from_blocks_rejects_empty() {
        let err = Chain::<Payload>::from_blocks(Vec::new()).unwrap_err();
        assert_eq!(err, ChainError::EmptyChain);
    }

    #[test]
    fn get_and_iter() {
        let chain = chain_with(&[("alice", 50)]);
        assert_eq!(chain.get(1).unwrap().payload, tx("alice", 50));
        assert!(chain.get(2).is_none());
        let indices: Vec<u64> = chain.iter().map(|b| b.index).collect();
        assert_eq!(indices, vec![0, 1]);
        assert_eq!((&chain).into_iter().count(), 2);
    }

    fn payloads() -> impl Strategy<Value = Vec<(String, i64)>> {
        prop::collection::vec(("[a-z]{1,8}", any::<i64>()), 0..16)
    }

    fn build(payloads: &[(String, i64)]) -> Chain<Payload> {
        let mut chain = Chain::new();
        for (actor, amount) in payloads {
            chain.append(tx(actor, *amount)).unwrap();
        }
        chain
    }

    proptest! {
        #[test]
        fn prop_links_follow_predecessor(payloads in payloads()) {
            let chain = build(&payloads);
            for pair in chain.blocks().windows(2) {
                prop_assert_eq!(pair[1].previous_hash, pair[0].hash);
            }
        }

        #[test]
        fn prop_index_equals_position(payloads in payloads()) {
            let chain = build(&payloads);
            prop_assert_eq!(chain.len(), payloads.len() + 1);
            for (i, block) in chain.iter().enumerate() {
                prop_assert_eq!(block.index, i as u64);
            }
        }

        #[test]
        fn prop_appended_chain_verifies(payloads in payloads()) {
            prop_assert!(build(&payloads).verify());
        }

        #[test]
        fn prop_any_single_field_tamper_detected(
            payloads in prop::collection::vec(("[a-z]{1,8}", any::<i64>()), 1..12),
            pick in any::<prop::sample::Index>(),
            field in 0usize..5,
        ) {
            let mut chain = build(&payloads);
            let target = 1 + pick.index(payloads.len());
            let block = &mut chain.blocks[target];
            match field {
                0 => block.index = block.index.wrapping_add(1),
                1 => {
                    let mut bytes = *block.previous_hash.as_bytes();
                    bytes[0] ^= 0xff;
                    block.previous_hash = BlockHash::from_bytes(bytes);
                }
                2 => block.timestamp = Timestamp::from_millis(block.timestamp.as_millis().wrapping_add(1)),
                3 => {
                    let amount = match &block.payload {
                        Payload::Transaction(t) => t.amount,
                        _ => 0,
                    };
                    set_amount(block, amount.wrapping_add(1));
                }
                _ => {
                    let mut bytes = *block.hash.as_bytes();
                    bytes[31] ^= 0x01;
                    block.hash = BlockHash::from_bytes(bytes);
                }
            }
            prop_assert!(!chain.verify());
        }
    }
}
