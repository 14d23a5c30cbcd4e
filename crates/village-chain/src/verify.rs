use std::fmt;

use serde::Serialize;
use village_crypto::BlockHasher;
use village_types::{Block, BlockHash};

/// The first integrity failure found in a block sequence.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("integrity violation at index {index}: {kind}")]
pub struct IntegrityViolation {
    /// Position in the sequence where the check failed.
    pub index: u64,
    pub kind: ViolationKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// Genesis does not carry index 0 and the sentinel link and hash.
    GenesisMismatch,
    /// A block's index is not its position.
    IndexGap,
    /// `previous_hash` does not match the predecessor's hash.
    BrokenLink,
    /// Stored hash differs from the recomputed digest.
    HashMismatch,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GenesisMismatch => write!(f, "genesis block is not the sentinel genesis"),
            Self::IndexGap => write!(f, "block index does not match its position"),
            Self::BrokenLink => write!(f, "previous hash does not match predecessor"),
            Self::HashMismatch => write!(f, "stored hash differs from computed hash"),
        }
    }
}

/// Hash chain integrity verifier.
///
/// Scans blocks in index order and stops at the first violation:
/// 1. Genesis has index 0 and the zero sentinel as both link and hash
/// 2. Every block's index equals its position
/// 3. Every later block's `previous_hash` equals its predecessor's hash
/// 4. Every later block's hash equals the recomputed digest
///
/// A payload that no longer serializes counts as a hash mismatch.
pub struct ChainVerifier;

impl ChainVerifier {
    pub fn verify_blocks<P: Serialize>(blocks: &[Block<P>]) -> Result<(), IntegrityViolation> {
        let Some(genesis) = blocks.first() else {
            return Ok(());
        };

        if genesis.index != 0 || !genesis.previous_hash.is_zero() || !genesis.hash.is_zero() {
            return Err(IntegrityViolation {
                index: 0,
                kind: ViolationKind::GenesisMismatch,
            });
        }

        let mut prev_hash: BlockHash = genesis.hash;
        for (position, block) in blocks.iter().enumerate().skip(1) {
            let index = position as u64;
            if block.index != index {
                return Err(IntegrityViolation {
                    index,
                    kind: ViolationKind::IndexGap,
                });
            }

            if block.previous_hash != prev_hash {
                return Err(IntegrityViolation {
                    index,
                    kind: ViolationKind::BrokenLink,
                });
            }

            if !BlockHasher::BLOCK.verify_block(block) {
                return Err(IntegrityViolation {
                    index,
                    kind: ViolationKind::HashMismatch,
                });
            }

            prev_hash = block.hash;
        }

        Ok(())
    }
}
