//! Interactive menu loop
//!
//! Shows the menu for the current session state, reads a command token,
//! dispatches it to the matching [`SessionController`] operation and prints
//! the outcome. User-input and business-rule errors are printed and the menu
//! is shown again; store and console failures end the loop.

use crate::core::session::SessionController;
use crate::core::traits::RecordStore;
use crate::io::Console;
use crate::types::{Balance, BankError, LoggedInCommand, LoggedOutCommand};
use rand::Rng;
use std::io::{BufRead, Write};
use tracing::error;

/// Whether the loop keeps going after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Parse a whole-number amount entered by the user
pub fn parse_amount(input: &str) -> Result<Balance, BankError> {
    input
        .trim()
        .parse::<Balance>()
        .map_err(|_| BankError::invalid_input(input, "expected a whole number"))
}

/// Run the menu loop until the user exits or input ends
///
/// # Errors
///
/// Returns the first non-recoverable error (store or console failure).
pub fn run<S, R, I, O>(
    session: &mut SessionController<S, R>,
    console: &mut Console<I, O>,
) -> Result<(), BankError>
where
    S: RecordStore,
    R: Rng,
    I: BufRead,
    O: Write,
{
    loop {
        let logged_in = session.is_logged_in();
        if logged_in {
            console.show_menu(&LoggedInCommand::MENU)?;
        } else {
            console.show_menu(&LoggedOutCommand::MENU)?;
        }

        let Some(token) = console.read_line()? else {
            return say_bye(console);
        };

        let outcome = if logged_in {
            match token.parse::<LoggedInCommand>() {
                Ok(command) => handle_logged_in(command, session, console),
                Err(e) => Err(e),
            }
        } else {
            match token.parse::<LoggedOutCommand>() {
                Ok(command) => handle_logged_out(command, session, console),
                Err(e) => Err(e),
            }
        };

        match outcome {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => return Ok(()),
            Err(e) if e.is_recoverable() => console.say(format!("\n{}\n", e))?,
            Err(e) => {
                error!(error = %e, "session aborted");
                return Err(e);
            }
        }
    }
}

fn say_bye<I: BufRead, O: Write>(console: &mut Console<I, O>) -> Result<(), BankError> {
    console.say("\nBye!")
}

fn handle_logged_out<S, R, I, O>(
    command: LoggedOutCommand,
    session: &mut SessionController<S, R>,
    console: &mut Console<I, O>,
) -> Result<Flow, BankError>
where
    S: RecordStore,
    R: Rng,
    I: BufRead,
    O: Write,
{
    match command {
        LoggedOutCommand::CreateAccount => {
            let account = session.create_account()?;
            console.say(format!(
                "\nYour card has been created\nYour card number:\n{}\nYour card PIN:\n{}\n",
                account.card_id, account.pin
            ))?;
        }
        LoggedOutCommand::LogIn => {
            let Some(card_id) = console.prompt("\nEnter your card number:")? else {
                return exit(console);
            };
            let Some(pin) = console.prompt("Enter your PIN:")? else {
                return exit(console);
            };
            session.log_in(&card_id, &pin)?;
            console.say("\nYou have successfully logged in!\n")?;
        }
        LoggedOutCommand::Exit => return exit(console),
    }
    Ok(Flow::Continue)
}

fn handle_logged_in<S, R, I, O>(
    command: LoggedInCommand,
    session: &mut SessionController<S, R>,
    console: &mut Console<I, O>,
) -> Result<Flow, BankError>
where
    S: RecordStore,
    R: Rng,
    I: BufRead,
    O: Write,
{
    match command {
        LoggedInCommand::Balance => {
            console.say(format!("\nBalance: {}\n", session.balance()?))?;
        }
        LoggedInCommand::AddIncome => {
            let Some(input) = console.prompt("\nEnter income:")? else {
                return exit(console);
            };
            session.add_income(parse_amount(&input)?)?;
            console.say("Income was added!\n")?;
        }
        LoggedInCommand::Transfer => {
            let Some(destination) = console.prompt("\nTransfer\nEnter card number:")? else {
                return exit(console);
            };
            // Reject a bad card number before asking for an amount
            session.check_counterparty(&destination)?;

            let Some(input) = console.prompt("Enter how much money you want to transfer:")? else {
                return exit(console);
            };
            session.transfer(&destination, parse_amount(&input)?)?;
            console.say("Success!\n")?;
        }
        LoggedInCommand::CloseAccount => {
            session.close_account()?;
            console.say("\nThe account has been closed!\n")?;
        }
        LoggedInCommand::LogOut => {
            session.log_out()?;
            console.say("\nYou have successfully logged out!\n")?;
        }
        LoggedInCommand::Exit => return exit(console),
    }
    Ok(Flow::Continue)
}

fn exit<I: BufRead, O: Write>(console: &mut Console<I, O>) -> Result<Flow, BankError> {
    say_bye(console)?;
    Ok(Flow::Exit)
}
