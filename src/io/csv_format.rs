//! CSV output for account listings
//!
//! Writes every stored account as CSV with columns `number,pin,balance`,
//! used by `--list-accounts` to dump the store before a session starts.

use crate::types::{Account, BankError};
use std::io::Write;

/// Write account records to CSV format
///
/// Accounts are sorted by card number for deterministic output.
///
/// # Arguments
///
/// * `accounts` - Slice of account records to write
/// * `output` - Mutable reference to a writer for outputting CSV
pub fn write_accounts_csv(accounts: &[Account], output: &mut dyn Write) -> Result<(), BankError> {
    let mut writer = csv::Writer::from_writer(output);

    let mut sorted_accounts = accounts.to_vec();
    sorted_accounts.sort_by(|a, b| a.card_id.cmp(&b.card_id));

    // The header row comes from the serde field names
    for account in &sorted_accounts {
        writer.serialize(account)?;
    }

    if sorted_accounts.is_empty() {
        writer.write_record(["number", "pin", "balance"])?;
    }

    writer.flush()?;
    Ok(())
}
