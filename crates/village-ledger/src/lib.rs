//! Village bookkeeping backed by a tamper-evident chain.
//!
//! This crate provides:
//! - [`Villager`] wealth accounts and [`Shop`] purchase/sale accounts
//! - A flat [`TransactionLog`] of villager transactions in recording order
//! - [`Ledger`], which appends every booking to a [`Chain`] before touching
//!   any balance, so balances can always be audited against the chain

pub mod account;
pub mod error;
pub mod ledger;
pub mod log;

pub use account::{Shop, Villager};
pub use error::LedgerError;
pub use ledger::Ledger;
pub use log::TransactionLog;

pub use village_chain::Chain;
