//! Money helpers for the ledger
//!
//! All balances and amounts are `rust_decimal::Decimal` values held at a
//! fixed scale of 2 (cents). Amounts supplied by callers may carry any scale
//! and are normalized with half-up rounding before validation.

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use super::error::LedgerError;

/// Number of fractional digits carried by every balance and amount
pub const MONEY_SCALE: u32 = 2;

/// Largest amount accepted by a single deposit or withdrawal: 1,000,000,000.00
pub const TRANSACTION_LIMIT: Decimal = Decimal::from_parts(1_215_752_192, 23, 0, false, 2);

/// Normalize a decimal to scale 2
///
/// Excess fractional digits are rounded half-up (away from zero on ties,
/// matching `RoundingMode.HALF_UP` style money arithmetic). Values with fewer
/// than two fractional digits are padded, so `250` becomes `250.00`.
pub fn normalize(amount: Decimal) -> Decimal {
    let mut value =
        amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    value.rescale(MONEY_SCALE);
    if value.is_zero() {
        value.set_sign_positive(true);
    }
    value
}

/// Render an amount the way it appears in transaction records: `$1234.50`
pub fn format_money(amount: Decimal) -> String {
    format!("${:.2}", normalize(amount))
}

/// Parse a raw amount field
///
/// Unparsable input is reported as `InvalidAmount`, the same failure a
/// non-positive amount produces.
pub fn parse_amount(raw: &str) -> Result<Decimal, LedgerError> {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed).map_err(|_| LedgerError::invalid_amount(trimmed))
}
