//! Transaction-related types for the PIN ledger
//!
//! This module defines the audit-log entry, the receipt returned by balance
//! mutations, and the command records replayed against the ledger.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::fmt;

use super::account::AccountId;

/// Rendering of log timestamps: `yyyy-MM-dd HH:mm:ss`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One record in an account's append-only transaction log
///
/// Renders as `[2024-01-15 09:30:00] Deposited: $250.00 | Balance: $750.00`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionEntry {
    /// Wall-clock time the record was appended
    pub timestamp: NaiveDateTime,

    /// Record text
    pub message: String,
}

impl TransactionEntry {
    /// Create a new entry
    pub fn new(timestamp: NaiveDateTime, message: impl Into<String>) -> Self {
        Self {
            timestamp,
            message: message.into(),
        }
    }

    /// Timestamp formatted as `yyyy-MM-dd HH:mm:ss`
    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

impl fmt::Display for TransactionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.formatted_timestamp(), self.message)
    }
}

/// Whether a successful mutation should be announced to the user
///
/// The ledger behaves identically in both modes; the mode only travels back
/// on the receipt so the presentation layer can decide what to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    /// Caller-invoked operation, announced on success
    Announced,

    /// Internal operation (the initial deposit at account creation)
    Silent,
}

/// Result of a successful deposit or withdrawal
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionReceipt {
    /// Normalized amount that was applied
    pub amount: Decimal,

    /// Balance after the operation
    pub balance: Decimal,

    /// Mode the operation ran in
    pub mode: OperationMode,
}

impl TransactionReceipt {
    /// Whether the presentation layer should announce this receipt
    pub fn is_announced(&self) -> bool {
        self.mode == OperationMode::Announced
    }
}

/// Commands understood by the replay engine
///
/// One per operation of the interactive banking menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    /// Create an account (optionally with an initial deposit)
    Open,

    /// Authenticate, then credit funds
    Deposit,

    /// Authenticate, then debit funds (requires sufficient balance)
    Withdraw,

    /// Authenticate, then read the balance
    Balance,

    /// Authenticate, then read the transaction log
    History,
}

impl CommandType {
    /// Lowercase command name as written in scripts
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandType::Open => "open",
            CommandType::Deposit => "deposit",
            CommandType::Withdraw => "withdraw",
            CommandType::Balance => "balance",
            CommandType::History => "history",
        }
    }
}

/// A single command from a replay script
#[derive(Debug, Clone, PartialEq)]
pub struct CommandRecord {
    /// Which operation to run
    pub command: CommandType,

    /// Target account identifier
    pub account: AccountId,

    /// Holder name (`open` only)
    pub holder: Option<String>,

    /// Amount for `open` (initial deposit), `deposit` and `withdraw`
    ///
    /// `None` reaches the ledger as an absent amount and is rejected there.
    pub amount: Option<Decimal>,

    /// PIN attempts in the order they are tried
    ///
    /// For `open` the first element is the new PIN.
    pub pins: Vec<String>,

    /// PIN confirmation (`open` only); defaults to the PIN when absent
    pub confirm_pin: Option<String>,
}
