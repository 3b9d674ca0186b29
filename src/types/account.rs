//! Account-related types for the PIN ledger
//!
//! The live account entity (`LedgerAccount`) lives in `core::account`; this
//! module holds the identifier type and the read-only snapshots handed out to
//! callers.

use rust_decimal::Decimal;

use super::transaction::TransactionEntry;

/// Account identifier
///
/// Any non-empty string without whitespace, assigned by the caller at creation.
pub type AccountId = String;

/// Point-in-time view of an account
///
/// Produced under the account lock, so `balance` is always consistent with
/// the transaction log at the moment the snapshot was taken.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountSummary {
    /// The account identifier
    pub account: AccountId,

    /// Display name of the account holder
    pub holder: String,

    /// Balance at scale 2
    pub balance: Decimal,
}

/// Copy of one account's transaction log
#[derive(Debug, Clone, PartialEq)]
pub struct AccountHistory {
    /// The account identifier
    pub account: AccountId,

    /// Entries in insertion order
    pub entries: Vec<TransactionEntry>,
}
