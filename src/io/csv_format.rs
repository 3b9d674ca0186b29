//! CSV format handling for command scripts and ledger reports
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord structure for deserialization
//! - Conversion from CSV records to domain commands
//! - Balance and history report serialization
//!
//! All functions are pure (no file I/O) for easy testing.
//!
//! # Script format
//!
//! ```text
//! op,account,holder,amount,pin,confirm
//! open,ACC1,Alice,500.00,1234,1234
//! deposit,ACC1,,250.00,0000|1234,
//! withdraw,ACC1,,100.00,1234,
//! balance,ACC1,,,1234,
//! history,ACC1,,,1234,
//! ```
//!
//! `pin` holds the PIN attempts in order, separated by `|`.

use crate::types::{
    parse_amount, AccountHistory, AccountSummary, CommandRecord, CommandType, LedgerError,
};
use serde::Deserialize;
use std::io::Write;

/// Separator between PIN attempts in the `pin` column
pub const PIN_ATTEMPT_SEPARATOR: char = '|';

/// CSV record structure for deserialization
///
/// Matches the script columns: op, account, holder, amount, pin, confirm.
/// Everything after `account` is optional because each command uses a
/// different subset.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvRecord {
    pub op: String,
    pub account: String,
    pub holder: Option<String>,
    pub amount: Option<String>,
    pub pin: Option<String>,
    pub confirm: Option<String>,
}

/// Convert a CsvRecord to a CommandRecord
///
/// This function:
/// - Parses the op string (case-insensitive, `withdrawal` accepted for `withdraw`)
/// - Parses the amount into a Decimal when present
/// - Splits the pin column into individual attempts
/// - Treats blank optional fields as absent
///
/// A missing amount is passed through as `None`; the ledger rejects it.
///
/// # Errors
///
/// - `InvalidCommand` for an unknown op
/// - `InvalidAmount` for an amount that does not parse as a decimal
pub fn convert_csv_record(csv_record: CsvRecord) -> Result<CommandRecord, LedgerError> {
    let command = match csv_record.op.trim().to_lowercase().as_str() {
        "open" => CommandType::Open,
        "deposit" => CommandType::Deposit,
        "withdraw" | "withdrawal" => CommandType::Withdraw,
        "balance" => CommandType::Balance,
        "history" => CommandType::History,
        _ => {
            return Err(LedgerError::invalid_command(
                &csv_record.op,
                Some(&csv_record.account),
            ))
        }
    };

    let amount = match non_blank(csv_record.amount) {
        Some(raw) => Some(parse_amount(&raw)?),
        None => None,
    };

    let pins = non_blank(csv_record.pin)
        .map(|raw| {
            raw.split(PIN_ATTEMPT_SEPARATOR)
                .map(str::trim)
                .filter(|pin| !pin.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Ok(CommandRecord {
        command,
        account: csv_record.account.trim().to_string(),
        holder: non_blank(csv_record.holder),
        amount,
        pins,
        confirm_pin: non_blank(csv_record.confirm),
    })
}

fn non_blank(field: Option<String>) -> Option<String> {
    field
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Write account balances in CSV format
///
/// Columns: account, holder, balance (two decimal places). Rows are sorted
/// by account identifier for deterministic output.
pub fn write_accounts_csv(
    accounts: &[AccountSummary],
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer.write_record(["account", "holder", "balance"])?;

    let mut sorted_accounts = accounts.to_vec();
    sorted_accounts.sort_by(|a, b| a.account.cmp(&b.account));

    for account in sorted_accounts {
        writer.write_record(&[
            account.account,
            account.holder,
            format!("{:.2}", account.balance),
        ])?;
    }

    writer.flush()?;

    Ok(())
}

/// Write transaction logs in CSV format
///
/// Columns: account, timestamp (`yyyy-MM-dd HH:mm:ss`), entry. Accounts are
/// sorted by identifier; entries keep their log order.
pub fn write_history_csv(
    histories: &[AccountHistory],
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer.write_record(["account", "timestamp", "entry"])?;

    let mut sorted = histories.to_vec();
    sorted.sort_by(|a, b| a.account.cmp(&b.account));

    for history in &sorted {
        for entry in &history.entries {
            writer.write_record([
                history.account.as_str(),
                entry.formatted_timestamp().as_str(),
                entry.message.as_str(),
            ])?;
        }
    }

    writer.flush()?;

    Ok(())
}
