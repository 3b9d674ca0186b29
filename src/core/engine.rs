//! Command processing engine
//!
//! This module provides the LedgerEngine that runs replay commands against an
//! account directory, coordinating the authenticator and the accounts.
//!
//! The engine enforces the banking flow:
//! - `open` runs the PIN pre-validation before the directory creates the account
//! - every other command authenticates first (bounded PIN attempts)
//! - only then does the command touch the account
//!
//! It is also the presentation seam: receipts in announced mode and balance
//! and history reads are reported through `tracing` at info level.

use crate::core::account::LedgerAccount;
use crate::core::authenticator::{validate_new_pin, AccountAuthenticator};
use crate::core::directory::AccountDirectory;
use crate::types::{
    format_money, AccountSummary, CommandRecord, CommandType, LedgerError, TransactionEntry,
    TransactionReceipt,
};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::info;

/// What a successfully processed command produced
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// A new account was created
    Opened(AccountSummary),

    /// Funds were credited
    Deposited(TransactionReceipt),

    /// Funds were debited
    Withdrew(TransactionReceipt),

    /// Balance was read
    Balance(Decimal),

    /// Transaction log was read
    History(Vec<TransactionEntry>),
}

/// Command processing engine
///
/// Shares its directory through `Arc` so the async strategy can run commands
/// for different accounts on different tasks.
#[derive(Debug, Clone)]
pub struct LedgerEngine {
    directory: Arc<AccountDirectory>,
    authenticator: AccountAuthenticator,
}

impl LedgerEngine {
    /// Create an engine over an existing directory
    pub fn new(directory: Arc<AccountDirectory>, authenticator: AccountAuthenticator) -> Self {
        LedgerEngine {
            directory,
            authenticator,
        }
    }

    /// The directory this engine operates on
    pub fn directory(&self) -> &AccountDirectory {
        &self.directory
    }

    /// Process a single command record
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A required field is missing
    /// - PIN validation or authentication fails
    /// - The account operation fails (invalid amount, limit, insufficient funds)
    pub fn process(&self, record: CommandRecord) -> Result<CommandOutcome, LedgerError> {
        match record.command {
            CommandType::Open => self.process_open(record),
            CommandType::Deposit => self.process_deposit(record),
            CommandType::Withdraw => self.process_withdraw(record),
            CommandType::Balance => self.process_balance(record),
            CommandType::History => self.process_history(record),
        }
    }

    /// Process an open command
    ///
    /// The confirmation defaults to the PIN itself when the script leaves it
    /// out.
    fn process_open(&self, record: CommandRecord) -> Result<CommandOutcome, LedgerError> {
        let holder = record
            .holder
            .as_deref()
            .ok_or_else(|| {
                LedgerError::missing_field(CommandType::Open.as_str(), &record.account, "holder")
            })?;

        let pin = record
            .pins
            .first()
            .ok_or_else(|| {
                LedgerError::missing_field(CommandType::Open.as_str(), &record.account, "pin")
            })?;

        let confirmation = record.confirm_pin.as_deref().unwrap_or(pin.as_str());
        validate_new_pin(pin, confirmation)?;

        let account = self
            .directory
            .create_account(&record.account, holder, record.amount, pin)?;

        Ok(CommandOutcome::Opened(account.summary()))
    }

    /// Process a deposit command
    fn process_deposit(&self, record: CommandRecord) -> Result<CommandOutcome, LedgerError> {
        let account = self.authenticate(&record)?;

        let receipt = account.deposit(record.amount)?;
        if receipt.is_announced() {
            info!(account = %account.identifier(), "Deposited {}", format_money(receipt.amount));
        }

        Ok(CommandOutcome::Deposited(receipt))
    }

    /// Process a withdraw command
    fn process_withdraw(&self, record: CommandRecord) -> Result<CommandOutcome, LedgerError> {
        let account = self.authenticate(&record)?;

        let receipt = account.withdraw(record.amount)?;
        if receipt.is_announced() {
            info!(account = %account.identifier(), "Withdrew {}", format_money(receipt.amount));
        }

        Ok(CommandOutcome::Withdrew(receipt))
    }

    /// Process a balance command
    fn process_balance(&self, record: CommandRecord) -> Result<CommandOutcome, LedgerError> {
        let account = self.authenticate(&record)?;

        let summary = account.summary();
        info!(
            account = %summary.account,
            holder = %summary.holder,
            "Current balance: {}",
            format_money(summary.balance)
        );

        Ok(CommandOutcome::Balance(summary.balance))
    }

    /// Process a history command
    fn process_history(&self, record: CommandRecord) -> Result<CommandOutcome, LedgerError> {
        let account = self.authenticate(&record)?;

        let entries = account.history();
        if entries.is_empty() {
            info!(account = %account.identifier(), "No transactions found.");
        }
        for entry in &entries {
            info!(account = %account.identifier(), "{}", entry);
        }

        Ok(CommandOutcome::History(entries))
    }

    fn authenticate(&self, record: &CommandRecord) -> Result<Arc<LedgerAccount>, LedgerError> {
        self.authenticator.authenticate(
            &self.directory,
            &record.account,
            record.pins.iter().map(String::as_str),
        )
    }
}

impl Default for LedgerEngine {
    fn default() -> Self {
        Self::new(
            Arc::new(AccountDirectory::new()),
            AccountAuthenticator::default(),
        )
    }
}
