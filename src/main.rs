//! Rust Card Bank CLI
//!
//! Interactive card bank simulator.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --database bank.s3db
//! cargo run -- --in-memory
//! cargo run -- --list-accounts
//! RUST_LOG=info cargo run
//! ```
//!
//! The menu is read from stdin and written to stdout. Log output goes to
//! stderr and defaults to warnings only.
//!
//! # Exit Codes
//!
//! - 0: The user exited (or input ended)
//! - 1: The card database could not be opened, or a store failure ended the session

use anyhow::{Context, Result};
use rust_card_bank::cli::{self, StoreChoice};
use rust_card_bank::core::{AccountDirectory, RecordStore, SessionController};
use rust_card_bank::io::{write_accounts_csv, Console};
use rust_card_bank::store::{InMemoryStore, SqliteStore};
use std::io;
use std::process;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = cli::parse_args();

    if let Err(e) = run(&args) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(args: &cli::CliArgs) -> Result<()> {
    match args.store_choice() {
        StoreChoice::InMemory => run_session(InMemoryStore::new(), args.list_accounts),
        StoreChoice::Sqlite(path) => {
            // The session never starts without a working store
            let store = SqliteStore::open(&path)
                .with_context(|| format!("cannot open card database {}", path.display()))?;
            run_session(store, args.list_accounts)
        }
    }
}

fn run_session<S: RecordStore>(store: S, list_accounts: bool) -> Result<()> {
    let directory = AccountDirectory::new(store);

    if list_accounts {
        let accounts = directory.list_accounts()?;
        write_accounts_csv(&accounts, &mut io::stdout())?;
    }

    let mut session = SessionController::new(directory);
    let mut console = Console::new(io::stdin().lock(), io::stdout().lock());
    cli::run(&mut session, &mut console)?;

    Ok(())
}
