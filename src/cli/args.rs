use clap::Parser;
use std::path::PathBuf;

/// Default database file, kept from the original bank
pub const DEFAULT_DATABASE: &str = "card.s3db";

/// Simulated card bank with an interactive menu
#[derive(Parser, Debug)]
#[command(name = "card-bank")]
#[command(about = "Issue simulated cards and manage their accounts from an interactive menu", long_about = None)]
pub struct CliArgs {
    /// SQLite database file holding the card table
    #[arg(
        long = "database",
        value_name = "PATH",
        default_value = DEFAULT_DATABASE,
        help = "Path to the SQLite card database (created if missing)"
    )]
    pub database: PathBuf,

    /// Keep accounts in memory only
    #[arg(
        long = "in-memory",
        conflicts_with = "database",
        help = "Keep accounts in memory; nothing is written to disk"
    )]
    pub in_memory: bool,

    /// Dump all accounts before the session starts
    #[arg(
        long = "list-accounts",
        help = "Print every stored account as CSV before showing the menu"
    )]
    pub list_accounts: bool,
}

/// Which record store the session runs against
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreChoice {
    InMemory,
    Sqlite(PathBuf),
}

impl CliArgs {
    /// Resolve the store selected by the arguments
    pub fn store_choice(&self) -> StoreChoice {
        if self.in_memory {
            StoreChoice::InMemory
        } else {
            StoreChoice::Sqlite(self.database.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::defaults(&["program"], StoreChoice::Sqlite(PathBuf::from(DEFAULT_DATABASE)))]
    #[case::custom_database(&["program", "--database", "bank.db"], StoreChoice::Sqlite(PathBuf::from("bank.db")))]
    #[case::in_memory(&["program", "--in-memory"], StoreChoice::InMemory)]
    fn test_store_choice(#[case] args: &[&str], #[case] expected: StoreChoice) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.store_choice(), expected);
    }

    #[rstest]
    #[case::absent(&["program"], false)]
    #[case::present(&["program", "--list-accounts"], true)]
    fn test_list_accounts_flag(#[case] args: &[&str], #[case] expected: bool) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.list_accounts, expected);
    }

    #[rstest]
    #[case::unknown_flag(&["program", "--verbose"])]
    #[case::missing_path(&["program", "--database"])]
    #[case::conflicting_stores(&["program", "--in-memory", "--database", "bank.db"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        let result = CliArgs::try_parse_from(args);
        assert!(result.is_err());
    }
}
