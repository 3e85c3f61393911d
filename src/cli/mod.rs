// CLI module
// Command-line arguments and the interactive menu loop

mod args;
pub mod repl;

pub use args::{CliArgs, StoreChoice, DEFAULT_DATABASE};
pub use repl::{parse_amount, run, Flow};

use clap::Parser;

/// Parse command-line arguments using clap
///
/// If parsing fails (invalid arguments or --help), clap displays an error
/// message or help text and exits the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
