//! Rust Card Bank Library
//! # Overview
//!
//! This library provides a single-session card bank simulator: it issues
//! Luhn-valid card numbers with PINs, authenticates a card + PIN pair, and
//! lets the logged-in user check a balance, add income, transfer money to
//! another card or close the account.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, menu commands, errors)
//! - [`cli`] - CLI arguments parsing and the interactive menu loop
//! - [`core`] - Business logic components:
//!   - [`core::luhn`] - Check digit computation and verification
//!   - [`core::generator`] - Card number and PIN generation
//!   - [`core::directory`] - Account lifecycle on top of a record store
//!   - [`core::session`] - Session state machine and transfer protocol
//! - [`store`] - Record store adapters (in-memory, SQLite)
//! - [`io`] - Console and CSV output
//!
//! # Card Numbers
//!
//! Every card number is 16 digits: the issuer prefix `400000`, nine random
//! digits, and a Luhn check digit. Generated numbers always pass
//! [`core::luhn::verify`], and any single mistyped digit fails it.
//!
//! # Session States
//!
//! - **Logged out**: create an account, log in, exit
//! - **Logged in**: balance, add income, transfer, close account, log out, exit
//!
//! # Consistency
//!
//! A transfer's debit and credit are applied in one atomic store commit, so
//! money is never debited without being credited. Balances never go negative
//! through a transfer.

pub mod cli;
pub mod core;
pub mod io;
pub mod store;
pub mod types;
