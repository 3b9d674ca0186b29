//! Account ledger module
//!
//! This module provides `LedgerAccount`, the owner of one account's identity,
//! balance, transaction log and PIN digest.
//!
//! A LedgerAccount is responsible for:
//! - Validating and normalizing deposit and withdrawal amounts
//! - Keeping the balance at scale 2 and never below zero
//! - Appending a timestamped record for every balance change and for every
//!   withdrawal refused for insufficient funds
//! - Handing out snapshots (balance, history, summary), never its state
//!
//! # Thread Safety
//!
//! Balance and log live together behind one account-scoped mutex. Each
//! validate-then-mutate sequence runs under that lock, and snapshot reads take
//! it too, so no reader sees a balance without its matching record.

use crate::core::credential::CredentialHash;
use crate::core::traits::Clock;
use crate::types::{
    format_money, normalize, AccountHistory, AccountId, AccountSummary, LedgerError,
    OperationMode, TransactionEntry, TransactionReceipt, MONEY_SCALE, TRANSACTION_LIMIT,
};
use rust_decimal::Decimal;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

/// Mutable part of an account, guarded by the account lock
#[derive(Debug)]
struct LedgerState {
    balance: Decimal,
    log: Vec<TransactionEntry>,
}

/// A single monetary account
///
/// Created through [`LedgerAccount::open`] (normally via the account
/// directory) and mutated only by [`deposit`](LedgerAccount::deposit) and
/// [`withdraw`](LedgerAccount::withdraw).
#[derive(Debug)]
pub struct LedgerAccount {
    identifier: AccountId,
    holder_name: String,
    credential: CredentialHash,
    clock: Arc<dyn Clock>,
    state: Mutex<LedgerState>,
}

impl LedgerAccount {
    /// Create a new account
    ///
    /// The balance starts at 0.00. A positive initial deposit is applied
    /// through the regular deposit path in silent mode and followed by an
    /// "Account created with initial deposit" record; an absent, zero or
    /// negative initial deposit records "Account created with no initial
    /// deposit.". An initial deposit above the per-transaction limit is
    /// refused by the deposit path, leaving the balance at 0.00, but the
    /// creation record is still appended.
    ///
    /// The PIN is hashed here and then dropped. Its format is checked by the
    /// caller beforehand (see `core::authenticator::validate_new_pin`).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The identifier is empty or contains whitespace
    /// - The holder name is blank
    pub fn open(
        identifier: &str,
        holder_name: &str,
        initial_deposit: Option<Decimal>,
        pin: &str,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, LedgerError> {
        if identifier.is_empty() || identifier.chars().any(char::is_whitespace) {
            return Err(LedgerError::invalid_identifier(identifier));
        }

        let holder_name = holder_name.trim();
        if holder_name.is_empty() {
            return Err(LedgerError::InvalidHolderName);
        }

        let account = LedgerAccount {
            identifier: identifier.to_string(),
            holder_name: holder_name.to_string(),
            credential: CredentialHash::from_pin(pin),
            clock,
            state: Mutex::new(LedgerState {
                balance: Decimal::new(0, MONEY_SCALE),
                log: Vec::new(),
            }),
        };

        let initial = initial_deposit
            .map(normalize)
            .filter(|amount| amount.is_sign_positive() && !amount.is_zero());
        match initial {
            Some(amount) => {
                if let Err(e) = account.deposit_with_mode(amount, OperationMode::Silent) {
                    warn!(account = %account.identifier, "initial deposit refused: {}", e);
                }
                account.record(format!(
                    "Account created with initial deposit: {}",
                    format_money(amount)
                ));
            }
            None => account.record("Account created with no initial deposit."),
        }

        Ok(account)
    }

    /// The account identifier
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The holder's display name
    pub fn holder_name(&self) -> &str {
        &self.holder_name
    }

    pub(crate) fn credential(&self) -> &CredentialHash {
        &self.credential
    }

    /// Deposit funds
    ///
    /// Accepts a `Decimal` or an `Option<Decimal>`; an absent amount is
    /// rejected like a non-positive one.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if the amount is absent or not greater than zero
    ///   after rounding to cents
    /// - `AmountExceedsLimit` if it is above 1,000,000,000.00
    ///
    /// Rejected deposits leave no trace in the transaction log.
    pub fn deposit(
        &self,
        amount: impl Into<Option<Decimal>>,
    ) -> Result<TransactionReceipt, LedgerError> {
        self.deposit_with_mode(amount, OperationMode::Announced)
    }

    /// Deposit funds, tagging the receipt with `mode`
    ///
    /// Validation and mutation are identical in both modes.
    pub(crate) fn deposit_with_mode(
        &self,
        amount: impl Into<Option<Decimal>>,
        mode: OperationMode,
    ) -> Result<TransactionReceipt, LedgerError> {
        let amount = validate_amount(amount.into())?;

        let mut state = self.lock_state();
        let new_balance = state
            .balance
            .checked_add(amount)
            .map(normalize)
            .ok_or_else(|| LedgerError::arithmetic_overflow("deposit", &self.identifier))?;

        state.balance = new_balance;
        self.append(
            &mut state,
            format!(
                "Deposited: {} | Balance: {}",
                format_money(amount),
                format_money(new_balance)
            ),
        );

        debug!(account = %self.identifier, %amount, balance = %new_balance, "deposit applied");

        Ok(TransactionReceipt {
            amount,
            balance: new_balance,
            mode,
        })
    }

    /// Withdraw funds
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if the amount is absent or not greater than zero
    ///   after rounding to cents
    /// - `AmountExceedsLimit` if it is above 1,000,000,000.00
    /// - `InsufficientFunds` if it is above the current balance; unlike the
    ///   other failures this one is recorded as a failed withdrawal attempt
    pub fn withdraw(
        &self,
        amount: impl Into<Option<Decimal>>,
    ) -> Result<TransactionReceipt, LedgerError> {
        let amount = validate_amount(amount.into())?;

        let mut state = self.lock_state();
        if amount > state.balance {
            let balance = state.balance;
            self.append(
                &mut state,
                format!(
                    "Failed withdrawal attempt: {} | Balance: {}",
                    format_money(amount),
                    format_money(balance)
                ),
            );
            warn!(account = %self.identifier, %amount, %balance, "withdrawal refused: insufficient funds");
            return Err(LedgerError::insufficient_funds(
                &self.identifier,
                balance,
                amount,
            ));
        }

        let new_balance = state
            .balance
            .checked_sub(amount)
            .map(normalize)
            .ok_or_else(|| LedgerError::arithmetic_underflow("withdrawal", &self.identifier))?;

        state.balance = new_balance;
        self.append(
            &mut state,
            format!(
                "Withdrew: {} | Balance: {}",
                format_money(amount),
                format_money(new_balance)
            ),
        );

        debug!(account = %self.identifier, %amount, balance = %new_balance, "withdrawal applied");

        Ok(TransactionReceipt {
            amount,
            balance: new_balance,
            mode: OperationMode::Announced,
        })
    }

    /// Current balance at scale 2
    pub fn balance(&self) -> Decimal {
        self.lock_state().balance
    }

    /// Copy of the transaction log in insertion order
    pub fn history(&self) -> Vec<TransactionEntry> {
        self.lock_state().log.clone()
    }

    /// Identifier, holder and balance in one consistent read
    pub fn summary(&self) -> AccountSummary {
        let state = self.lock_state();
        AccountSummary {
            account: self.identifier.clone(),
            holder: self.holder_name.clone(),
            balance: state.balance,
        }
    }

    /// Identifier together with a copy of the log
    pub fn account_history(&self) -> AccountHistory {
        AccountHistory {
            account: self.identifier.clone(),
            entries: self.history(),
        }
    }

    fn record(&self, message: impl Into<String>) {
        let mut state = self.lock_state();
        self.append(&mut state, message);
    }

    fn append(&self, state: &mut LedgerState, message: impl Into<String>) {
        state
            .log
            .push(TransactionEntry::new(self.clock.now(), message));
    }

    // A panic while the lock is held cannot leave the balance and log out of
    // step: both are written only after every fallible step has succeeded.
    fn lock_state(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Presence, normalization, positivity and ceiling checks, in that order
fn validate_amount(amount: Option<Decimal>) -> Result<Decimal, LedgerError> {
    let amount = amount.ok_or_else(LedgerError::missing_amount)?;
    let amount = normalize(amount);

    if amount <= Decimal::ZERO {
        return Err(LedgerError::invalid_amount(amount));
    }

    if amount > TRANSACTION_LIMIT {
        return Err(LedgerError::amount_exceeds_limit(amount, TRANSACTION_LIMIT));
    }

    Ok(amount)
}
