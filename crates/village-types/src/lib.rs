//! Foundation types for the village ledger.
//!
//! Every other village crate depends on `village-types`. It defines the
//! values a chain is made of and the records the ledger stores in it.
//!
//! # Key Types
//!
//! - [`BlockHash`] — 32-byte block digest, rendered as lowercase hex
//! - [`Timestamp`] — wall-clock milliseconds since the UNIX epoch
//! - [`Block`] — one hash-linked chain entry carrying an opaque payload
//! - [`ChainPayload`] — what a payload type must provide to live in a chain
//! - [`Payload`] — the ledger's payload: genesis label, transaction, or shop entry

pub mod block;
pub mod error;
pub mod hash;
pub mod payload;
pub mod temporal;

pub use block::{Block, ChainPayload};
pub use error::TypeError;
pub use hash::BlockHash;
pub use payload::{Payload, ShopEntry, ShopSide, Transaction, GENESIS_LABEL};
pub use temporal::Timestamp;
