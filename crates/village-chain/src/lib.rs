//! Append-only, tamper-evident chain of hash-linked blocks.
//!
//! The chain owns its genesis block and grows only through
//! [`Chain::append`]. Every block's hash covers its index, predecessor
//! hash, timestamp and payload, so rewriting any stored field is detected by
//! [`Chain::verify`].
//!
//! The crate does no logging and no I/O; callers decide what to do with an
//! integrity failure.

pub mod chain;
pub mod error;
pub mod verify;

pub use chain::Chain;
pub use error::ChainError;
pub use verify::{ChainVerifier, IntegrityViolation, ViolationKind};
