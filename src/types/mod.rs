//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account record and identifier aliases
//! - `command`: Menu commands for each session state
//! - `error`: Error types for the card bank

pub mod account;
pub mod command;
pub mod error;

pub use account::{Account, Balance, CardId};
pub use command::{LoggedInCommand, LoggedOutCommand};
pub use error::{BankError, CounterpartyReason};
