//! I/O module
//!
//! Handles console interaction and account listing output.
//!
//! # Components
//!
//! - `console` - Prompted line input and text output for the menu loop
//! - `csv_format` - CSV serialization of account records

pub mod console;
pub mod csv_format;

pub use console::Console;
pub use csv_format::write_accounts_csv;
