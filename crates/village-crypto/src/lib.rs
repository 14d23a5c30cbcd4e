//! Block hashing for the village ledger.
//!
//! Provides the single digest function shared by block construction and
//! chain verification. Hashing wraps BLAKE3; no custom cryptography.

pub mod hasher;

pub use hasher::{BlockHasher, HasherError};
