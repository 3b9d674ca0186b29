//! PIN authentication
//!
//! `AccountAuthenticator::verify` is the stateless check of one claimed PIN
//! against one account. Attempt counting belongs to an authentication
//! session, not to the account, so it lives in
//! [`AccountAuthenticator::authenticate`]: every call starts a fresh session
//! with its own attempt budget and a refused session leaves the account as it
//! was.

use crate::core::account::LedgerAccount;
use crate::core::directory::AccountDirectory;
use crate::types::LedgerError;
use std::sync::Arc;
use tracing::{debug, warn};

/// Attempts allowed per authentication session
pub const MAX_PIN_ATTEMPTS: usize = 3;

/// Shortest accepted PIN
pub const MIN_PIN_LENGTH: usize = 4;

/// Longest accepted PIN
pub const MAX_PIN_LENGTH: usize = 6;

/// Verifies PINs and runs bounded-attempt authentication sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountAuthenticator {
    max_attempts: usize,
}

impl AccountAuthenticator {
    /// Create an authenticator allowing `max_attempts` tries per session
    ///
    /// Zero falls back to the default of 3 with a warning.
    pub fn new(max_attempts: usize) -> Self {
        let max_attempts = if max_attempts == 0 {
            warn!(
                "Invalid max_pin_attempts ({}), using default ({})",
                max_attempts, MAX_PIN_ATTEMPTS
            );
            MAX_PIN_ATTEMPTS
        } else {
            max_attempts
        };

        Self { max_attempts }
    }

    /// Attempts allowed per session
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Check one claimed PIN against an account
    ///
    /// An absent claim is rejected without hashing anything. The stored
    /// digest never leaves the account.
    pub fn verify(account: &LedgerAccount, claimed_pin: Option<&str>) -> bool {
        match claimed_pin {
            Some(pin) => account.credential().matches(pin),
            None => false,
        }
    }

    /// Locate an account and authenticate against it
    ///
    /// Attempts are tried in order and only the first `max_attempts` are
    /// considered; anything beyond the budget is ignored.
    ///
    /// # Errors
    ///
    /// - `AccountNotFound` if no account has this identifier (no attempt is
    ///   consumed)
    /// - `AuthFailed` if none of the permitted attempts matched
    pub fn authenticate<'a, I>(
        &self,
        directory: &AccountDirectory,
        identifier: &str,
        attempts: I,
    ) -> Result<Arc<LedgerAccount>, LedgerError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let account = directory
            .get(identifier)
            .ok_or_else(|| LedgerError::account_not_found(identifier))?;

        let mut tried = 0;
        for pin in attempts.into_iter().take(self.max_attempts) {
            tried += 1;
            if Self::verify(&account, Some(pin)) {
                debug!(account = %identifier, attempt = tried, "authenticated");
                return Ok(account);
            }
            debug!(account = %identifier, attempt = tried, max = self.max_attempts, "incorrect PIN");
        }

        warn!(account = %identifier, attempts = tried, "authentication failed");
        Err(LedgerError::auth_failed(identifier, tried))
    }
}

impl Default for AccountAuthenticator {
    fn default() -> Self {
        Self {
            max_attempts: MAX_PIN_ATTEMPTS,
        }
    }
}

/// Check a new PIN before an account is created with it
///
/// The PIN must be 4 to 6 ASCII digits and equal to its confirmation.
///
/// # Errors
///
/// - `InvalidPinFormat` if the PIN is the wrong length or not all digits
/// - `PinMismatch` if the confirmation differs
pub fn validate_new_pin(pin: &str, confirmation: &str) -> Result<(), LedgerError> {
    let well_formed = (MIN_PIN_LENGTH..=MAX_PIN_LENGTH).contains(&pin.len())
        && pin.bytes().all(|b| b.is_ascii_digit());
    if !well_formed {
        return Err(LedgerError::InvalidPinFormat);
    }

    if pin != confirmation {
        return Err(LedgerError::PinMismatch);
    }

    Ok(())
}
