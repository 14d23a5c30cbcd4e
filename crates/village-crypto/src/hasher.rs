use serde::Serialize;
use village_types::{Block, BlockHash, Timestamp};

/// Domain-separated BLAKE3 block hasher.
///
/// The digest covers four fields in a fixed order: index, previous hash,
/// timestamp, payload. Each field is rendered to its canonical string form
/// and written with an 8-byte little-endian length prefix, so field
/// boundaries are unambiguous (`1` + `23` never collides with `12` + `3`).
///
/// Canonical forms:
/// - index: decimal integer
/// - previous hash: 64 lowercase hex characters
/// - timestamp: decimal milliseconds
/// - payload: compact JSON from `serde_json`
pub struct BlockHasher {
    domain: &'static str,
}

impl BlockHasher {
    /// Hasher for ledger blocks.
    pub const BLOCK: Self = Self {
        domain: "village-block-v1",
    };

    /// Create a hasher with a custom domain tag.
    pub const fn new(domain: &'static str) -> Self {
        Self { domain }
    }

    /// Digest a block's fields.
    pub fn digest<P: Serialize>(
        &self,
        index: u64,
        previous_hash: &BlockHash,
        timestamp: Timestamp,
        payload: &P,
    ) -> Result<BlockHash, HasherError> {
        let payload =
            serde_json::to_vec(payload).map_err(|e| HasherError::Serialization(e.to_string()))?;

        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        update_field(&mut hasher, index.to_string().as_bytes());
        update_field(&mut hasher, previous_hash.to_hex().as_bytes());
        update_field(&mut hasher, timestamp.to_string().as_bytes());
        update_field(&mut hasher, &payload);
        Ok(BlockHash::from_bytes(*hasher.finalize().as_bytes()))
    }

    /// Recompute the digest of a stored block from its fields.
    pub fn digest_block<P: Serialize>(&self, block: &Block<P>) -> Result<BlockHash, HasherError> {
        self.digest(
            block.index,
            &block.previous_hash,
            block.timestamp,
            &block.payload,
        )
    }

    /// Returns `true` if the block's stored hash matches its fields.
    pub fn verify_block<P: Serialize>(&self, block: &Block<P>) -> bool {
        self.digest_block(block)
            .map(|h| h == block.hash)
            .unwrap_or(false)
    }

    /// The domain tag used by this hasher.
    pub fn domain(&self) -> &str {
        self.domain
    }
}

fn update_field(hasher: &mut blake3::Hasher, bytes: &[u8]) {
    hasher.update(&(bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}

/// Errors from hashing operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HasherError {
    #[error("serialization error: {0}")]
    Serialization(String),
}
