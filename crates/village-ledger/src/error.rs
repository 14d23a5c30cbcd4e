use village_chain::ChainError;

/// Errors produced by ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("unknown villager: {0}")]
    UnknownVillager(String),

    #[error("unknown shop: {0}")]
    UnknownShop(String),

    #[error("villager already exists: {0}")]
    DuplicateVillager(String),

    #[error("shop already exists: {0}")]
    DuplicateShop(String),

    #[error("name must not be empty")]
    EmptyName,

    #[error("amount {amount} would overflow the balance of {name}")]
    Overflow { name: String, amount: i64 },

    #[error("chain error: {0}")]
    Chain(#[from] ChainError),
}
