use village_crypto::HasherError;

use crate::verify::IntegrityViolation;

/// Errors produced by chain operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainError {
    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("chain has no blocks")]
    EmptyChain,

    #[error(transparent)]
    Integrity(#[from] IntegrityViolation),
}

impl From<HasherError> for ChainError {
    fn from(err: HasherError) -> Self {
        match err {
            HasherError::Serialization(msg) => Self::Serialization(msg),
        }
    }
}
