//! Menu command types for the session state machine
//!
//! Each session state accepts its own closed set of numbered commands.
//! Tokens are parsed into the enum of the active state; anything else is an
//! `UnknownCommand` error.

use super::error::BankError;
use std::str::FromStr;

/// Commands accepted while no account is logged in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggedOutCommand {
    /// `1` - issue a new card
    CreateAccount,
    /// `2` - authenticate with card number and PIN
    LogIn,
    /// `0` - leave the program
    Exit,
}

/// Commands accepted while an account is logged in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggedInCommand {
    /// `1` - show the balance
    Balance,
    /// `2` - deposit funds
    AddIncome,
    /// `3` - move funds to another card
    Transfer,
    /// `4` - delete the account and log out
    CloseAccount,
    /// `5` - log out without deleting anything
    LogOut,
    /// `0` - leave the program
    Exit,
}

impl LoggedOutCommand {
    /// Menu lines in display order
    pub const MENU: [&'static str; 3] = ["1. Create an account", "2. Log into account", "0. Exit"];
}

impl LoggedInCommand {
    /// Menu lines in display order
    pub const MENU: [&'static str; 6] = [
        "1. Balance",
        "2. Add income",
        "3. Do transfer",
        "4. Close account",
        "5. Log out",
        "0. Exit",
    ];
}

impl FromStr for LoggedOutCommand {
    type Err = BankError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim() {
            "1" => Ok(LoggedOutCommand::CreateAccount),
            "2" => Ok(LoggedOutCommand::LogIn),
            "0" => Ok(LoggedOutCommand::Exit),
            other => Err(BankError::unknown_command(other)),
        }
    }
}

impl FromStr for LoggedInCommand {
    type Err = BankError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim() {
            "1" => Ok(LoggedInCommand::Balance),
            "2" => Ok(LoggedInCommand::AddIncome),
            "3" => Ok(LoggedInCommand::Transfer),
            "4" => Ok(LoggedInCommand::CloseAccount),
            "5" => Ok(LoggedInCommand::LogOut),
            "0" => Ok(LoggedInCommand::Exit),
            other => Err(BankError::unknown_command(other)),
        }
    }
}
