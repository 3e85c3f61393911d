//! In-memory record store
//!
//! This module provides the `InMemoryStore`, a `RecordStore` backed by a
//! HashMap. Nothing survives the process; it is used by `--in-memory`
//! sessions, tests and benchmarks.

use crate::core::traits::RecordStore;
use crate::types::{Account, Balance, BankError};
use std::collections::HashMap;

/// Record store holding every account in a HashMap keyed by card number
#[derive(Debug, Default)]
pub struct InMemoryStore {
    /// Map of card numbers to account records
    accounts: HashMap<String, Account>,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        InMemoryStore {
            accounts: HashMap::new(),
        }
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the store holds no records
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Compute a new balance with checked arithmetic
    fn apply_delta(account: &Account, delta: Balance, operation: &str) -> Result<Balance, BankError> {
        account
            .balance
            .checked_add(delta)
            .ok_or_else(|| BankError::arithmetic_overflow(operation, &account.card_id))
    }
}

impl RecordStore for InMemoryStore {
    fn create(&mut self, account: &Account) -> Result<(), BankError> {
        if self.accounts.contains_key(&account.card_id) {
            return Err(BankError::duplicate_identifier(&account.card_id));
        }
        self.accounts
            .insert(account.card_id.clone(), account.clone());
        Ok(())
    }

    fn read_by_id_and_pin(&self, card_id: &str, pin: &str) -> Result<Option<Account>, BankError> {
        Ok(self
            .accounts
            .get(card_id)
            .filter(|account| account.pin_matches(pin))
            .cloned())
    }

    fn read(&self, card_id: &str) -> Result<Option<Account>, BankError> {
        Ok(self.accounts.get(card_id).cloned())
    }

    fn update_balance(&mut self, card_id: &str, delta: Balance) -> Result<(), BankError> {
        let account = self
            .accounts
            .get_mut(card_id)
            .ok_or_else(|| BankError::account_not_found(card_id))?;

        account.balance = Self::apply_delta(account, delta, "update_balance")?;
        Ok(())
    }

    fn transfer(
        &mut self,
        source: &str,
        destination: &str,
        amount: Balance,
    ) -> Result<(), BankError> {
        if amount <= 0 {
            return Err(BankError::invalid_input(
                &amount.to_string(),
                "transfer amount must be positive",
            ));
        }

        // Validate both sides before touching either balance
        let from = self
            .accounts
            .get(source)
            .ok_or_else(|| BankError::account_not_found(source))?;
        let to = self
            .accounts
            .get(destination)
            .ok_or_else(|| BankError::account_not_found(destination))?;

        if from.balance < amount {
            return Err(BankError::insufficient_funds(from.balance, amount));
        }

        let new_source = Self::apply_delta(from, -amount, "transfer")?;
        let new_destination = if source == destination {
            new_source + amount
        } else {
            Self::apply_delta(to, amount, "transfer")?
        };

        if let Some(account) = self.accounts.get_mut(source) {
            account.balance = new_source;
        }
        if let Some(account) = self.accounts.get_mut(destination) {
            account.balance = new_destination;
        }

        Ok(())
    }

    fn delete(&mut self, card_id: &str) -> Result<(), BankError> {
        self.accounts.remove(card_id);
        Ok(())
    }

    fn exists(&self, card_id: &str) -> Result<bool, BankError> {
        Ok(self.accounts.contains_key(card_id))
    }

    fn list_all(&self) -> Result<Vec<Account>, BankError> {
        let mut accounts: Vec<Account> = self.accounts.values().cloned().collect();
        accounts.sort_by(|a, b| a.card_id.cmp(&b.card_id));
        Ok(accounts)
    }
}
