//! Thread-safe account directory
//!
//! This module provides the `AccountDirectory` struct, which maps account
//! identifiers to live accounts and enforces identifier uniqueness.
//!
//! # Design
//!
//! The directory uses `DashMap` (a concurrent HashMap) so lookups and
//! creations for different identifiers proceed in parallel. Accounts are
//! stored behind `Arc`; each account serializes its own mutations, so the
//! directory never needs to hold a map lock while money moves.
//!
//! There is no global registry: every directory is an explicit value, and a
//! fresh one per test keeps tests isolated.

use crate::core::account::LedgerAccount;
use crate::core::traits::{Clock, SystemClock};
use crate::types::{AccountHistory, AccountId, AccountSummary, LedgerError};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use rust_decimal::Decimal;
use std::fmt;
use std::sync::Arc;
use tracing::info;

/// Registry of all accounts, keyed by identifier
pub struct AccountDirectory {
    /// Map of identifiers to accounts
    accounts: DashMap<AccountId, Arc<LedgerAccount>>,

    /// Timestamp source handed to every account created here
    clock: Arc<dyn Clock>,
}

impl AccountDirectory {
    /// Create an empty directory stamping records with local system time
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an empty directory with a custom timestamp source
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        AccountDirectory {
            accounts: DashMap::new(),
            clock,
        }
    }

    /// Create and register a new account
    ///
    /// The uniqueness check and the insertion happen under the same map
    /// entry lock, so two concurrent creations of one identifier cannot both
    /// succeed.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The identifier is already registered (`DuplicateIdentifier`)
    /// - Account construction fails (see [`LedgerAccount::open`])
    pub fn create_account(
        &self,
        identifier: &str,
        holder_name: &str,
        initial_deposit: Option<Decimal>,
        pin: &str,
    ) -> Result<Arc<LedgerAccount>, LedgerError> {
        match self.accounts.entry(identifier.to_string()) {
            Entry::Occupied(_) => Err(LedgerError::duplicate_identifier(identifier)),
            Entry::Vacant(slot) => {
                let account = Arc::new(LedgerAccount::open(
                    identifier,
                    holder_name,
                    initial_deposit,
                    pin,
                    Arc::clone(&self.clock),
                )?);
                slot.insert(Arc::clone(&account));

                info!(account = %identifier, holder = %account.holder_name(), "account created");
                Ok(account)
            }
        }
    }

    /// Look up an account by identifier
    pub fn get(&self, identifier: &str) -> Option<Arc<LedgerAccount>> {
        self.accounts
            .get(identifier)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Check whether an identifier is registered
    pub fn contains(&self, identifier: &str) -> bool {
        self.accounts.contains_key(identifier)
    }

    /// Number of registered accounts
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether no account has been created yet
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Summaries of all accounts, sorted by identifier
    pub fn summaries(&self) -> Vec<AccountSummary> {
        self.sorted_accounts()
            .iter()
            .map(|account| account.summary())
            .collect()
    }

    /// Transaction logs of all accounts, sorted by identifier
    pub fn histories(&self) -> Vec<AccountHistory> {
        self.sorted_accounts()
            .iter()
            .map(|account| account.account_history())
            .collect()
    }

    // Clone the Arcs out first so no shard lock is held while account locks
    // are taken.
    fn sorted_accounts(&self) -> Vec<Arc<LedgerAccount>> {
        let mut accounts: Vec<Arc<LedgerAccount>> = self
            .accounts
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        accounts.sort_by(|a, b| a.identifier().cmp(b.identifier()));
        accounts
    }
}

impl Default for AccountDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AccountDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountDirectory")
            .field("accounts", &self.accounts.len())
            .field("clock", &self.clock)
            .finish()
    }
}
