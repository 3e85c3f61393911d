//! Core traits for account persistence
//!
//! This module defines the record store abstraction the account directory is
//! built on, so the in-memory and sqlite stores can be used interchangeably.

use crate::types::{Account, Balance, BankError};

/// Trait for durable account storage keyed by card number
///
/// The directory is the only writer. Implementations must keep card numbers
/// unique and must never leave a transfer half applied.
pub trait RecordStore {
    /// Insert a new record
    ///
    /// Fails with `DuplicateIdentifier` if the card number is already present.
    fn create(&mut self, account: &Account) -> Result<(), BankError>;

    /// Get a record whose card number and PIN both match
    fn read_by_id_and_pin(&self, card_id: &str, pin: &str) -> Result<Option<Account>, BankError>;

    /// Get a record by card number alone
    fn read(&self, card_id: &str) -> Result<Option<Account>, BankError>;

    /// Add `delta` (possibly negative) to a record's balance
    ///
    /// Fails with `AccountNotFound` if there is no such record.
    fn update_balance(&mut self, card_id: &str, delta: Balance) -> Result<(), BankError>;

    /// Move `amount` from `source` to `destination` in one atomic step
    ///
    /// Fails with `InsufficientFunds` if the source balance would go negative
    /// and with `AccountNotFound` if either record is missing. On failure
    /// neither balance changes.
    fn transfer(
        &mut self,
        source: &str,
        destination: &str,
        amount: Balance,
    ) -> Result<(), BankError>;

    /// Remove a record; removing an absent card number is a no-op
    fn delete(&mut self, card_id: &str) -> Result<(), BankError>;

    /// Check whether a record exists
    fn exists(&self, card_id: &str) -> Result<bool, BankError>;

    /// Get all records sorted by card number
    fn list_all(&self) -> Result<Vec<Account>, BankError>;
}
