//! Token ledger of an oracle node.
//!
//! Tracks the available balance, the amount locked per outstanding stake and
//! the accumulated profit, and persists them through an
//! [`oracle_store::DocumentStore`].

#![deny(missing_docs)]

/// The ledger and its persisted form.
pub mod balance;
/// Error types for ledger persistence.
pub mod errors;

pub use balance::{Balance, BalanceDoc};
pub use errors::LedgerError;
