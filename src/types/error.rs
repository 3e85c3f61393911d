//! Error types for the card bank
//!
//! This module defines all error types that can occur while generating
//! identifiers, talking to the record store, or running a session.
//! Display strings are shown to the user verbatim by the menu loop.
//!
//! # Error Categories
//!
//! - **Input Errors**: Malformed numbers, unknown menu tokens
//! - **Business Rule Errors**: Wrong credentials, self transfer, bad counterparty, insufficient funds
//! - **Session Errors**: Operation not legal in the current session state
//! - **Store Errors**: Duplicate keys (retried internally), connectivity and query failures

use super::account::Balance;
use std::fmt;
use thiserror::Error;

/// Why a transfer counterparty was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterpartyReason {
    /// The card number does not pass Luhn verification
    FailedChecksum,
    /// The card number is well formed but no such account exists
    NotFound,
}

impl fmt::Display for CounterpartyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CounterpartyReason::FailedChecksum => {
                write!(f, "Probably you made a mistake in the card number. Please try again!")
            }
            CounterpartyReason::NotFound => write!(f, "Such a card does not exist."),
        }
    }
}

/// Main error type for the card bank
///
/// This enum represents all possible errors that can occur in the
/// directory, the stores, and the session controller. Each variant
/// carries enough context to be logged, while its display string is
/// suitable for the interactive menu.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BankError {
    /// Malformed numeric entry (non-digit card number, bad amount, empty input)
    ///
    /// This is a recoverable error - the user is re-prompted.
    #[error("Invalid input '{input}': {reason}")]
    InvalidInput {
        /// The offending input
        input: String,
        /// What was wrong with it
        reason: String,
    },

    /// Unknown card number or wrong PIN
    ///
    /// Reported uniformly so the user cannot tell which of the two failed.
    #[error("Wrong card number or PIN!")]
    AuthenticationFailed,

    /// Transfer destination is the logged-in account itself
    #[error("You can't transfer money to the same account!")]
    SelfTransfer,

    /// Transfer destination fails Luhn verification or does not exist
    #[error("{reason}")]
    InvalidCounterparty {
        /// The rejected card number
        card_id: String,
        /// Which check rejected it
        reason: CounterpartyReason,
    },

    /// Transfer amount exceeds the source balance
    ///
    /// This is a recoverable error - balances are left unchanged.
    #[error("Not enough money!")]
    InsufficientFunds {
        /// Balance of the source account
        balance: Balance,
        /// Amount the user asked to move
        requested: Balance,
    },

    /// A generated card number collided with an existing record
    ///
    /// Internal only: the directory retries with a fresh identifier and
    /// never surfaces this to the user.
    #[error("Card number {card_id} already exists")]
    DuplicateIdentifier {
        /// The colliding card number
        card_id: String,
    },

    /// The record store could not be opened or initialized
    ///
    /// Fatal: the process exits before any session begins.
    #[error("Record store unavailable: {message}")]
    StoreUnavailable {
        /// Description of the failure
        message: String,
    },

    /// Any other record store failure
    ///
    /// Fatal: never retried.
    #[error("Record store failure: {message}")]
    StoreFailure {
        /// Description of the failure
        message: String,
    },

    /// A balance update targeted a card number with no record
    #[error("Account {card_id} not found")]
    AccountNotFound {
        /// The missing card number
        card_id: String,
    },

    /// Applying a balance change would overflow
    #[error("Arithmetic overflow in {operation} for account {card_id}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Card number of the account
        card_id: String,
    },

    /// Menu token not recognised in the current state
    #[error("Unknown command '{token}'")]
    UnknownCommand {
        /// The token the user entered
        token: String,
    },

    /// Operation requires a logged-in session
    #[error("You need to log in before you can {operation}")]
    NotLoggedIn {
        /// The attempted operation
        operation: String,
    },

    /// Log in attempted while a session is already active
    #[error("You are already logged in")]
    AlreadyLoggedIn,

    /// Console I/O failure
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },
}

// Conversion from io::Error to BankError
impl From<std::io::Error> for BankError {
    fn from(error: std::io::Error) -> Self {
        BankError::Io {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to BankError
impl From<csv::Error> for BankError {
    fn from(error: csv::Error) -> Self {
        BankError::Io {
            message: error.to_string(),
        }
    }
}

// Conversion from rusqlite::Error to BankError
//
// Constraint violations are classified by the sqlite store itself, since
// only it knows which key collided.
impl From<rusqlite::Error> for BankError {
    fn from(error: rusqlite::Error) -> Self {
        BankError::StoreFailure {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl BankError {
    /// Create an InvalidInput error
    pub fn invalid_input(input: &str, reason: &str) -> Self {
        BankError::InvalidInput {
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create an InvalidCounterparty error
    pub fn invalid_counterparty(card_id: &str, reason: CounterpartyReason) -> Self {
        BankError::InvalidCounterparty {
            card_id: card_id.to_string(),
            reason,
        }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(balance: Balance, requested: Balance) -> Self {
        BankError::InsufficientFunds { balance, requested }
    }

    /// Create a DuplicateIdentifier error
    pub fn duplicate_identifier(card_id: &str) -> Self {
        BankError::DuplicateIdentifier {
            card_id: card_id.to_string(),
        }
    }

    /// Create a StoreUnavailable error
    pub fn store_unavailable(message: impl fmt::Display) -> Self {
        BankError::StoreUnavailable {
            message: message.to_string(),
        }
    }

    /// Create an AccountNotFound error
    pub fn account_not_found(card_id: &str) -> Self {
        BankError::AccountNotFound {
            card_id: card_id.to_string(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, card_id: &str) -> Self {
        BankError::ArithmeticOverflow {
            operation: operation.to_string(),
            card_id: card_id.to_string(),
        }
    }

    /// Create an UnknownCommand error
    pub fn unknown_command(token: &str) -> Self {
        BankError::UnknownCommand {
            token: token.to_string(),
        }
    }

    /// Create a NotLoggedIn error
    pub fn not_logged_in(operation: &str) -> Self {
        BankError::NotLoggedIn {
            operation: operation.to_string(),
        }
    }

    /// Whether the session loop can report this error and keep going
    ///
    /// User-input and business-rule violations are recoverable. Store and
    /// console failures abort the session.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            BankError::StoreUnavailable { .. }
                | BankError::StoreFailure { .. }
                | BankError::ArithmeticOverflow { .. }
                | BankError::Io { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::invalid_input(
        BankError::invalid_input("12a4", "expected only digits"),
        "Invalid input '12a4': expected only digits"
    )]
    #[case::authentication_failed(BankError::AuthenticationFailed, "Wrong card number or PIN!")]
    #[case::self_transfer(
        BankError::SelfTransfer,
        "You can't transfer money to the same account!"
    )]
    #[case::counterparty_checksum(
        BankError::invalid_counterparty("4000001234567890", CounterpartyReason::FailedChecksum),
        "Probably you made a mistake in the card number. Please try again!"
    )]
    #[case::counterparty_not_found(
        BankError::invalid_counterparty("4000001234567899", CounterpartyReason::NotFound),
        "Such a card does not exist."
    )]
    #[case::insufficient_funds(BankError::insufficient_funds(500, 600), "Not enough money!")]
    #[case::duplicate_identifier(
        BankError::duplicate_identifier("4000001234567899"),
        "Card number 4000001234567899 already exists"
    )]
    #[case::store_unavailable(
        BankError::store_unavailable("unable to open database file"),
        "Record store unavailable: unable to open database file"
    )]
    #[case::unknown_command(BankError::unknown_command("9"), "Unknown command '9'")]
    #[case::not_logged_in(
        BankError::not_logged_in("check your balance"),
        "You need to log in before you can check your balance"
    )]
    fn test_error_display(#[case] error: BankError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::invalid_input(BankError::invalid_input("x", "y"), true)]
    #[case::authentication_failed(BankError::AuthenticationFailed, true)]
    #[case::self_transfer(BankError::SelfTransfer, true)]
    #[case::insufficient_funds(BankError::insufficient_funds(0, 1), true)]
    #[case::unknown_command(BankError::unknown_command("7"), true)]
    #[case::store_unavailable(BankError::store_unavailable("gone"), false)]
    #[case::store_failure(BankError::StoreFailure { message: "disk I/O error".to_string() }, false)]
    #[case::overflow(BankError::arithmetic_overflow("deposit", "4000001234567899"), false)]
    #[case::io(BankError::Io { message: "broken pipe".to_string() }, false)]
    fn test_is_recoverable(#[case] error: BankError, #[case] expected: bool) {
        assert_eq!(error.is_recoverable(), expected);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "broken pipe");
        let error: BankError = io_error.into();
        assert!(matches!(error, BankError::Io { .. }));
        assert_eq!(error.to_string(), "I/O error: broken pipe");
    }

    #[test]
    fn test_rusqlite_error_conversion() {
        let error: BankError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(error, BankError::StoreFailure { .. }));
        assert!(!error.is_recoverable());
    }
}
