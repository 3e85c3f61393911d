//! Line-oriented console
//!
//! Wraps a buffered reader and a writer so the menu loop can be driven by
//! stdin/stdout in production and by in-memory buffers in tests.

use crate::types::BankError;
use std::fmt::Display;
use std::io::{BufRead, Write};

/// Prompted line input and text output
pub struct Console<I: BufRead, O: Write> {
    input: I,
    output: O,
}

impl<I: BufRead, O: Write> Console<I, O> {
    /// Create a console over the given input and output
    pub fn new(input: I, output: O) -> Self {
        Console { input, output }
    }

    /// Read one line with surrounding whitespace removed
    ///
    /// # Returns
    ///
    /// `None` once the input is exhausted
    pub fn read_line(&mut self) -> Result<Option<String>, BankError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Print a message, then read the reply
    pub fn prompt(&mut self, message: &str) -> Result<Option<String>, BankError> {
        self.say(message)?;
        self.read_line()
    }

    /// Print one message followed by a newline
    pub fn say(&mut self, message: impl Display) -> Result<(), BankError> {
        writeln!(self.output, "{}", message)?;
        self.output.flush()?;
        Ok(())
    }

    /// Print a menu, one entry per line
    pub fn show_menu(&mut self, entries: &[&str]) -> Result<(), BankError> {
        for entry in entries {
            writeln!(self.output, "{}", entry)?;
        }
        self.output.flush()?;
        Ok(())
    }

    /// Consume the console and return its output
    pub fn into_output(self) -> O {
        self.output
    }
}
