use std::fmt;

use serde::{Deserialize, Serialize};

use crate::block::ChainPayload;

/// Label carried by the genesis block of a ledger chain.
pub const GENESIS_LABEL: &str = "Genesis block";

/// A villager's wealth change: positive for income, negative for spending.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transaction {
    pub actor: String,
    pub amount: i64,
}

impl Transaction {
    pub fn new(actor: impl Into<String>, amount: i64) -> Self {
        Self {
            actor: actor.into(),
            amount,
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} made a transaction of {}", self.actor, self.amount)
    }
}

/// Which side of a trade a shop entry records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShopSide {
    Purchase,
    Sale,
}

impl fmt::Display for ShopSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Purchase => write!(f, "purchase"),
            Self::Sale => write!(f, "sale"),
        }
    }
}

/// A purchase or sale booked by a shop.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShopEntry {
    pub shop: String,
    pub side: ShopSide,
    pub amount: i64,
}

/// Everything the ledger writes into its chain.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Payload {
    Genesis { label: String },
    Transaction(Transaction),
    Shop(ShopEntry),
}

impl ChainPayload for Payload {
    fn genesis() -> Self {
        Self::Genesis {
            label: GENESIS_LABEL.into(),
        }
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Genesis { label } => f.write_str(label),
            Self::Transaction(tx) => write!(f, "{tx}"),
            Self::Shop(entry) => write!(
                f,
                "{} booked a {} of {}",
                entry.shop, entry.side, entry.amount
            ),
        }
    }
}

impl From<Transaction> for Payload {
    fn from(tx: Transaction) -> Self {
        Self::Transaction(tx)
    }
}

impl From<ShopEntry> for Payload {
    fn from(entry: ShopEntry) -> Self {
        Self::Shop(entry)
    }
}
