//! Account directory
//!
//! This module provides the `AccountDirectory`, the sole owner and writer of
//! account records. It sits on top of a [`RecordStore`] and uses an
//! [`IdentifierGenerator`] to issue new cards.
//!
//! The directory is responsible for:
//! - Creating accounts, retrying silently when a generated card number collides
//! - Authenticating card number + PIN pairs
//! - Applying deposits and atomic transfers
//! - Closing accounts permanently

use crate::core::generator::IdentifierGenerator;
use crate::core::traits::RecordStore;
use crate::types::{Account, Balance, BankError};
use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, info, warn};

/// Manages all card accounts through a record store
pub struct AccountDirectory<S: RecordStore, R: Rng = StdRng> {
    store: S,
    generator: IdentifierGenerator<R>,
}

impl<S: RecordStore> AccountDirectory<S, StdRng> {
    /// Create a directory that issues cards from OS entropy
    pub fn new(store: S) -> Self {
        Self::with_generator(store, IdentifierGenerator::from_entropy())
    }
}

impl<S: RecordStore, R: Rng> AccountDirectory<S, R> {
    /// Create a directory with an explicit identifier generator
    pub fn with_generator(store: S, generator: IdentifierGenerator<R>) -> Self {
        AccountDirectory { store, generator }
    }

    /// Read-only access to the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Issue a new card with a zero balance
    ///
    /// Generates a card number and PIN and inserts the record. If the card
    /// number collides with an existing record, a fresh one is generated and
    /// the insert is retried until it succeeds.
    ///
    /// # Errors
    ///
    /// Any store failure other than `DuplicateIdentifier` is returned without
    /// retrying.
    pub fn add_account(&mut self) -> Result<Account, BankError> {
        loop {
            let account = self.generator.generate_account_seed()?;

            match self.store.create(&account) {
                Ok(()) => {
                    info!(card_id = %account.card_id, "account created");
                    return Ok(account);
                }
                Err(BankError::DuplicateIdentifier { card_id }) => {
                    warn!(%card_id, "generated card number already issued, retrying");
                }
                Err(error) => return Err(error),
            }
        }
    }

    /// Authenticate a card number + PIN pair
    ///
    /// # Returns
    ///
    /// The account only if it exists and its PIN matches exactly. An unknown
    /// card number and a wrong PIN both yield `None`.
    pub fn get_account(&self, card_id: &str, pin: &str) -> Result<Option<Account>, BankError> {
        let account = self.store.read_by_id_and_pin(card_id, pin)?;
        if account.is_none() {
            debug!(card_id, "credentials rejected");
        }
        Ok(account)
    }

    /// Look up an account by card number alone
    pub fn find_account(&self, card_id: &str) -> Result<Option<Account>, BankError> {
        self.store.read(card_id)
    }

    /// Add `amount` to an account's balance
    ///
    /// `amount` may be negative. No lower-bound check is made here; callers
    /// validate sufficiency before debiting.
    pub fn deposit_income(&mut self, card_id: &str, amount: Balance) -> Result<(), BankError> {
        self.store.update_balance(card_id, amount)?;
        debug!(card_id, amount, "balance updated");
        Ok(())
    }

    /// Move `amount` from `source` to `destination` in a single commit
    ///
    /// Either both balances change or neither does.
    pub fn transfer(
        &mut self,
        source: &str,
        destination: &str,
        amount: Balance,
    ) -> Result<(), BankError> {
        self.store.transfer(source, destination, amount)?;
        info!(source, destination, amount, "transfer completed");
        Ok(())
    }

    /// Delete an account permanently
    ///
    /// Closing an absent card number is a no-op.
    pub fn close_account(&mut self, card_id: &str) -> Result<(), BankError> {
        self.store.delete(card_id)?;
        info!(card_id, "account closed");
        Ok(())
    }

    /// Check whether an account exists
    pub fn account_exists(&self, card_id: &str) -> Result<bool, BankError> {
        self.store.exists(card_id)
    }

    /// Get every account, sorted by card number
    pub fn list_accounts(&self) -> Result<Vec<Account>, BankError> {
        self.store.list_all()
    }
}
