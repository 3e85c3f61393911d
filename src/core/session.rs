//! Session state machine
//!
//! This module provides the `SessionController`, which tracks whether a user
//! is logged in and exposes the operations legal in each state. The menu loop
//! in [`crate::cli::repl`] maps numbered commands onto these operations.
//!
//! The cached account held while logged in is re-read from the store after
//! every mutation, so the balance shown and the balance checked by a transfer
//! are always the persisted value.
//!
//! # Transfer Protocol
//!
//! A transfer is checked in this order, stopping at the first failure:
//! 1. destination is the logged-in card → `SelfTransfer`
//! 2. destination fails Luhn verification → `InvalidCounterparty`
//! 3. destination does not exist → `InvalidCounterparty`
//! 4. amount exceeds the cached balance → `InsufficientFunds`
//! 5. the credit would overflow the destination balance → `InvalidInput`
//!
//! The debit and credit are then applied in one atomic store commit.

use crate::core::directory::AccountDirectory;
use crate::core::luhn;
use crate::core::traits::RecordStore;
use crate::types::{Account, Balance, BankError, CounterpartyReason};
use rand::rngs::StdRng;
use rand::Rng;
use tracing::debug;

/// Which state the session is in
///
/// The logged-in state carries the cached account, so a logged-in session
/// without an account cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No account is authenticated (initial state)
    LoggedOut,
    /// An account is authenticated
    LoggedIn(Account),
}

/// Drives one interactive session over an account directory
pub struct SessionController<S: RecordStore, R: Rng = StdRng> {
    directory: AccountDirectory<S, R>,
    state: SessionState,
}

impl<S: RecordStore, R: Rng> SessionController<S, R> {
    /// Start a logged-out session
    pub fn new(directory: AccountDirectory<S, R>) -> Self {
        SessionController {
            directory,
            state: SessionState::LoggedOut,
        }
    }

    /// Current session state
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Whether an account is logged in
    pub fn is_logged_in(&self) -> bool {
        matches!(self.state, SessionState::LoggedIn(_))
    }

    /// The logged-in account, if any
    pub fn current_account(&self) -> Option<&Account> {
        match &self.state {
            SessionState::LoggedIn(account) => Some(account),
            SessionState::LoggedOut => None,
        }
    }

    /// Access to the directory, for diagnostics
    pub fn directory(&self) -> &AccountDirectory<S, R> {
        &self.directory
    }

    fn require_logged_in(&self, operation: &str) -> Result<&Account, BankError> {
        self.current_account()
            .ok_or_else(|| BankError::not_logged_in(operation))
    }

    /// Re-read the cached account from the store
    fn refresh(&mut self) -> Result<(), BankError> {
        let card_id = match &self.state {
            SessionState::LoggedIn(account) => account.card_id.clone(),
            SessionState::LoggedOut => return Ok(()),
        };

        match self.directory.find_account(&card_id)? {
            Some(account) => {
                self.state = SessionState::LoggedIn(account);
                Ok(())
            }
            None => {
                self.state = SessionState::LoggedOut;
                Err(BankError::account_not_found(&card_id))
            }
        }
    }

    /// Issue a new card (logged-out command 1)
    pub fn create_account(&mut self) -> Result<Account, BankError> {
        if self.is_logged_in() {
            return Err(BankError::AlreadyLoggedIn);
        }
        self.directory.add_account()
    }

    /// Authenticate and move to the logged-in state (logged-out command 2)
    ///
    /// # Errors
    ///
    /// Returns `AuthenticationFailed` for an unknown card number or a wrong
    /// PIN alike; the session stays logged out.
    pub fn log_in(&mut self, card_id: &str, pin: &str) -> Result<&Account, BankError> {
        if self.is_logged_in() {
            return Err(BankError::AlreadyLoggedIn);
        }

        let account = self
            .directory
            .get_account(card_id, pin)?
            .ok_or(BankError::AuthenticationFailed)?;

        debug!(card_id, "logged in");
        self.state = SessionState::LoggedIn(account);
        self.require_logged_in("log in")
    }

    /// Balance of the logged-in account (logged-in command 1)
    pub fn balance(&self) -> Result<Balance, BankError> {
        Ok(self.require_logged_in("check your balance")?.balance)
    }

    /// Deposit a positive amount (logged-in command 2)
    ///
    /// # Returns
    ///
    /// The balance after the deposit, as re-read from the store
    pub fn add_income(&mut self, amount: Balance) -> Result<Balance, BankError> {
        let account = self.require_logged_in("add income")?;
        if amount <= 0 {
            return Err(BankError::invalid_input(
                &amount.to_string(),
                "income must be a positive amount",
            ));
        }
        if account.balance.checked_add(amount).is_none() {
            return Err(BankError::invalid_input(
                &amount.to_string(),
                "income would exceed the largest balance a card can hold",
            ));
        }

        let card_id = account.card_id.clone();
        self.directory.deposit_income(&card_id, amount)?;
        self.refresh()?;
        self.balance()
    }

    /// Check a transfer destination without moving any money
    ///
    /// Runs steps 1-3 of the transfer protocol.
    pub fn check_counterparty(&self, destination: &str) -> Result<(), BankError> {
        let source = self.require_logged_in("make a transfer")?;

        if destination == source.card_id {
            return Err(BankError::SelfTransfer);
        }
        if !luhn::verify(destination)? {
            return Err(BankError::invalid_counterparty(
                destination,
                CounterpartyReason::FailedChecksum,
            ));
        }
        if !self.directory.account_exists(destination)? {
            return Err(BankError::invalid_counterparty(
                destination,
                CounterpartyReason::NotFound,
            ));
        }
        Ok(())
    }

    /// Move money to another card (logged-in command 3)
    ///
    /// # Returns
    ///
    /// The source balance after the transfer
    pub fn transfer(&mut self, destination: &str, amount: Balance) -> Result<Balance, BankError> {
        self.check_counterparty(destination)?;

        let source = self.require_logged_in("make a transfer")?;
        if amount <= 0 {
            return Err(BankError::invalid_input(
                &amount.to_string(),
                "transfer amount must be positive",
            ));
        }
        if amount > source.balance {
            return Err(BankError::insufficient_funds(source.balance, amount));
        }
        let source = source.card_id.clone();

        if let Some(target) = self.directory.find_account(destination)? {
            if target.balance.checked_add(amount).is_none() {
                return Err(BankError::invalid_input(
                    &amount.to_string(),
                    "transfer would exceed the largest balance the destination can hold",
                ));
            }
        }

        self.directory.transfer(&source, destination, amount)?;
        self.refresh()?;
        self.balance()
    }

    /// Delete the logged-in account and log out (logged-in command 4)
    pub fn close_account(&mut self) -> Result<(), BankError> {
        let card_id = self.require_logged_in("close your account")?.card_id.clone();
        self.directory.close_account(&card_id)?;
        self.state = SessionState::LoggedOut;
        Ok(())
    }

    /// Log out without deleting anything (logged-in command 5)
    pub fn log_out(&mut self) -> Result<(), BankError> {
        self.require_logged_in("log out")?;
        self.state = SessionState::LoggedOut;
        Ok(())
    }
}
