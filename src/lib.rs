//! PIN Ledger Library
//! # Overview
//!
//! An in-memory ledger of PIN-protected money accounts. Each account keeps a
//! non-negative two-decimal balance and an append-only transaction log, and
//! every deposit, withdrawal and read is gated behind PIN authentication.
//! Command scripts can be replayed through either a sync or an async strategy.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (money helpers, log entries, commands, errors)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::account`] - Balance and log of one account, with its invariants
//!   - [`core::directory`] - Identifier-to-account registry
//!   - [`core::authenticator`] - PIN verification and bounded-attempt sessions
//!   - [`core::engine`] - Command processing orchestration
//! - [`io`] - Command script parsing and report output
//! - [`strategy`] - Sync and async replay pipelines
//!
//! # Money
//!
//! Amounts are `rust_decimal::Decimal` values kept at two fractional digits,
//! rounded half away from zero. A single deposit or withdrawal may not exceed
//! 1,000,000,000.00.
//!
//! # Transaction Log
//!
//! Every successful deposit and withdrawal is logged, as is every withdrawal
//! refused for insufficient funds. Requests rejected for an invalid or
//! over-limit amount leave no trace.

pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use core::{AccountAuthenticator, AccountDirectory, LedgerAccount, LedgerEngine};
pub use io::{write_accounts_csv, write_history_csv};
pub use types::{
    AccountHistory, AccountId, AccountSummary, CommandRecord, CommandType, LedgerError,
    OperationMode, TransactionEntry, TransactionReceipt,
};
