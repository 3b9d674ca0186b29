//! Error types for the PIN ledger
//!
//! This module defines every failure the ledger, the authenticator and the
//! command replay can report. All of them are recoverable: a failed command
//! leaves the ledger untouched (apart from the audited failed withdrawal)
//! and replay continues with the next command.
//!
//! # Error Categories
//!
//! - **Amount Errors**: missing, non-positive, unparsable or oversized amounts
//! - **Ledger Errors**: insufficient funds, arithmetic overflow/underflow
//! - **Directory Errors**: duplicate or malformed identifiers, unknown accounts
//! - **Credential Errors**: malformed PINs, confirmation mismatch, failed authentication
//! - **Input Errors**: file I/O, CSV parsing, unknown commands

use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the ledger
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Amount is absent, not greater than zero after normalization, or unparsable
    #[error("Invalid amount '{amount}': amount must be greater than zero")]
    InvalidAmount {
        /// The offending amount as supplied (or `<missing>`)
        amount: String,
    },

    /// Amount is above the per-transaction ceiling
    #[error("Amount {amount} exceeds the single-transaction limit of {limit}")]
    AmountExceedsLimit {
        /// Normalized amount that was requested
        amount: Decimal,
        /// The ceiling in force
        limit: Decimal,
    },

    /// Withdrawal is larger than the current balance
    ///
    /// The attempt is recorded in the account's transaction log.
    #[error("Insufficient funds in account {account}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// Account identifier
        account: String,
        /// Balance at the time of the attempt
        balance: Decimal,
        /// Requested withdrawal amount
        requested: Decimal,
    },

    /// Arithmetic overflow would occur
    #[error("Arithmetic overflow in {operation} for account {account}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Account identifier
        account: String,
    },

    /// Arithmetic underflow would occur
    #[error("Arithmetic underflow in {operation} for account {account}")]
    ArithmeticUnderflow {
        /// Operation that would underflow
        operation: String,
        /// Account identifier
        account: String,
    },

    /// An account with this identifier already exists
    #[error("Account {account} already exists")]
    DuplicateIdentifier {
        /// The identifier that is already taken
        account: String,
    },

    /// Identifier is empty or contains whitespace
    #[error("Invalid account identifier '{identifier}': must be non-empty with no spaces")]
    InvalidIdentifier {
        /// The rejected identifier
        identifier: String,
    },

    /// Holder name is empty
    #[error("Account holder name cannot be empty")]
    InvalidHolderName,

    /// PIN is not 4 to 6 ASCII digits
    #[error("PIN must be 4 to 6 numeric digits")]
    InvalidPinFormat,

    /// PIN and its confirmation differ
    #[error("PIN confirmation does not match")]
    PinMismatch,

    /// No account is registered under the identifier
    #[error("Account {account} not found")]
    AccountNotFound {
        /// The identifier that was looked up
        account: String,
    },

    /// Every permitted PIN attempt was wrong (or none were supplied)
    #[error("Authentication failed for account {account} after {attempts} attempt(s)")]
    AuthFailed {
        /// Account identifier
        account: String,
        /// Number of attempts that were checked
        attempts: usize,
    },

    /// A command is missing a field it requires
    #[error("{command} command for account {account} requires a {field}")]
    MissingField {
        /// Command name
        command: String,
        /// Account identifier
        account: String,
        /// Name of the missing field
        field: String,
    },

    /// Unknown command in the replay script
    #[error("Invalid command '{command}'{}", account.as_ref().map(|a| format!(" for account {}", a)).unwrap_or_default())]
    InvalidCommand {
        /// The unrecognised command string
        command: String,
        /// Account identifier (if available)
        account: Option<String>,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },
}

impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        LedgerError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl LedgerError {
    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: impl ToString) -> Self {
        LedgerError::InvalidAmount {
            amount: amount.to_string(),
        }
    }

    /// Create an InvalidAmount error for an absent amount
    pub fn missing_amount() -> Self {
        Self::invalid_amount("<missing>")
    }

    /// Create an AmountExceedsLimit error
    pub fn amount_exceeds_limit(amount: Decimal, limit: Decimal) -> Self {
        LedgerError::AmountExceedsLimit { amount, limit }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(account: &str, balance: Decimal, requested: Decimal) -> Self {
        LedgerError::InsufficientFunds {
            account: account.to_string(),
            balance,
            requested,
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, account: &str) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
            account: account.to_string(),
        }
    }

    /// Create an ArithmeticUnderflow error
    pub fn arithmetic_underflow(operation: &str, account: &str) -> Self {
        LedgerError::ArithmeticUnderflow {
            operation: operation.to_string(),
            account: account.to_string(),
        }
    }

    /// Create a DuplicateIdentifier error
    pub fn duplicate_identifier(account: &str) -> Self {
        LedgerError::DuplicateIdentifier {
            account: account.to_string(),
        }
    }

    /// Create an InvalidIdentifier error
    pub fn invalid_identifier(identifier: &str) -> Self {
        LedgerError::InvalidIdentifier {
            identifier: identifier.to_string(),
        }
    }

    /// Create an AccountNotFound error
    pub fn account_not_found(account: &str) -> Self {
        LedgerError::AccountNotFound {
            account: account.to_string(),
        }
    }

    /// Create an AuthFailed error
    pub fn auth_failed(account: &str, attempts: usize) -> Self {
        LedgerError::AuthFailed {
            account: account.to_string(),
            attempts,
        }
    }

    /// Create a MissingField error
    pub fn missing_field(command: &str, account: &str, field: &str) -> Self {
        LedgerError::MissingField {
            command: command.to_string(),
            account: account.to_string(),
            field: field.to_string(),
        }
    }

    /// Create an InvalidCommand error
    pub fn invalid_command(command: &str, account: Option<&str>) -> Self {
        LedgerError::InvalidCommand {
            command: command.to_string(),
            account: account.map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;

    #[rstest]
    #[case::invalid_amount(
        LedgerError::InvalidAmount { amount: "-5.00".to_string() },
        "Invalid amount '-5.00': amount must be greater than zero"
    )]
    #[case::amount_exceeds_limit(
        LedgerError::AmountExceedsLimit { amount: Decimal::new(200_000_000_000, 2), limit: Decimal::new(100_000_000_000, 2) },
        "Amount 2000000000.00 exceeds the single-transaction limit of 1000000000.00"
    )]
    #[case::insufficient_funds(
        LedgerError::InsufficientFunds { account: "ACC1".to_string(), balance: Decimal::new(75000, 2), requested: Decimal::new(100000, 2) },
        "Insufficient funds in account ACC1: balance 750.00, requested 1000.00"
    )]
    #[case::duplicate_identifier(
        LedgerError::DuplicateIdentifier { account: "ACC1".to_string() },
        "Account ACC1 already exists"
    )]
    #[case::account_not_found(
        LedgerError::AccountNotFound { account: "GHOST".to_string() },
        "Account GHOST not found"
    )]
    #[case::auth_failed(
        LedgerError::AuthFailed { account: "ACC1".to_string(), attempts: 3 },
        "Authentication failed for account ACC1 after 3 attempt(s)"
    )]
    #[case::invalid_command_with_account(
        LedgerError::InvalidCommand { command: "transfer".to_string(), account: Some("ACC1".to_string()) },
        "Invalid command 'transfer' for account ACC1"
    )]
    #[case::invalid_command_without_account(
        LedgerError::InvalidCommand { command: "transfer".to_string(), account: None },
        "Invalid command 'transfer'"
    )]
    #[case::missing_field(
        LedgerError::MissingField { command: "open".to_string(), account: "ACC1".to_string(), field: "holder".to_string() },
        "open command for account ACC1 requires a holder"
    )]
    #[case::parse_error_with_line(
        LedgerError::ParseError { line: Some(42), message: "Invalid field".to_string() },
        "CSV parse error at line 42: Invalid field"
    )]
    #[case::parse_error_without_line(
        LedgerError::ParseError { line: None, message: "Invalid field".to_string() },
        "CSV parse error: Invalid field"
    )]
    fn test_error_display(#[case] error: LedgerError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::missing_amount(
        LedgerError::missing_amount(),
        LedgerError::InvalidAmount { amount: "<missing>".to_string() }
    )]
    #[case::insufficient_funds(
        LedgerError::insufficient_funds("ACC1", Decimal::new(500, 2), Decimal::new(1000, 2)),
        LedgerError::InsufficientFunds { account: "ACC1".to_string(), balance: Decimal::new(500, 2), requested: Decimal::new(1000, 2) }
    )]
    #[case::auth_failed(
        LedgerError::auth_failed("ACC1", 3),
        LedgerError::AuthFailed { account: "ACC1".to_string(), attempts: 3 }
    )]
    #[case::invalid_command(
        LedgerError::invalid_command("transfer", None),
        LedgerError::InvalidCommand { command: "transfer".to_string(), account: None }
    )]
    fn test_helper_functions(#[case] result: LedgerError, #[case] expected: LedgerError) {
        assert_eq!(result, expected);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: LedgerError = io_error.into();
        assert!(matches!(error, LedgerError::IoError { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }
}
