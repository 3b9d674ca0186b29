//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account identifiers and snapshots
//! - `transaction`: Log entries, receipts and replay commands
//! - `money`: Scale-2 decimal helpers and the per-transaction ceiling
//! - `error`: Error types for the ledger

pub mod account;
pub mod error;
pub mod money;
pub mod transaction;

pub use account::{AccountHistory, AccountId, AccountSummary};
pub use error::LedgerError;
pub use money::{format_money, normalize, parse_amount, MONEY_SCALE, TRANSACTION_LIMIT};
pub use transaction::{
    CommandRecord, CommandType, OperationMode, TransactionEntry, TransactionReceipt,
    TIMESTAMP_FORMAT,
};
