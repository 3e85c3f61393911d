//! SQLite record store
//!
//! Persists accounts in the `card` table of a SQLite database file, the same
//! layout the bank has always used (`card.s3db` by default). Card numbers are
//! protected by a UNIQUE constraint, and a transfer runs inside one SQL
//! transaction so a failure between the debit and the credit rolls both back.

use crate::core::traits::RecordStore;
use crate::types::{Account, Balance, BankError};
use rusqlite::{ffi, params, Connection, OptionalExtension, Row};
use std::path::Path;
use tracing::{debug, info};

const CREATE_CARD_TABLE: &str = "CREATE TABLE IF NOT EXISTS card (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    number TEXT UNIQUE,
    pin TEXT,
    balance INTEGER DEFAULT 0
)";

/// Record store backed by a SQLite connection
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database file at `path` and ensure the schema
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the file cannot be opened or the table
    /// cannot be created.
    pub fn open(path: &Path) -> Result<Self, BankError> {
        let conn = Connection::open(path).map_err(BankError::store_unavailable)?;
        info!(path = %path.display(), "opened card database");
        Self::with_connection(conn)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self, BankError> {
        let conn = Connection::open_in_memory().map_err(BankError::store_unavailable)?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, BankError> {
        conn.execute(CREATE_CARD_TABLE, [])
            .map_err(BankError::store_unavailable)?;
        Ok(SqliteStore { conn })
    }

    fn account_from_row(row: &Row<'_>) -> rusqlite::Result<Account> {
        Ok(Account {
            card_id: row.get(0)?,
            pin: row.get(1)?,
            balance: row.get(2)?,
        })
    }
}

/// Whether a rusqlite error is a UNIQUE violation
///
/// Other constraint failures (NOT NULL, CHECK, triggers) are store failures.
fn is_unique_violation(error: &rusqlite::Error) -> bool {
    matches!(
        error,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

/// Read the stored balance of one card, if it exists
fn read_balance(conn: &Connection, card_id: &str) -> Result<Option<Balance>, BankError> {
    let balance = conn
        .query_row(
            "SELECT balance FROM card WHERE number = ?1",
            params![card_id],
            |row| row.get(0),
        )
        .optional()?;
    Ok(balance)
}

/// Add `delta` to a stored balance with checked arithmetic
///
/// SQLite silently promotes an overflowing integer sum to REAL, so the sum is
/// computed here and written back as a plain integer.
fn apply_delta(
    conn: &Connection,
    card_id: &str,
    delta: Balance,
    operation: &str,
) -> Result<Balance, BankError> {
    let balance = read_balance(conn, card_id)?
        .ok_or_else(|| BankError::account_not_found(card_id))?;
    let updated = balance
        .checked_add(delta)
        .ok_or_else(|| BankError::arithmetic_overflow(operation, card_id))?;
    conn.execute(
        "UPDATE card SET balance = ?1 WHERE number = ?2",
        params![updated, card_id],
    )?;
    Ok(updated)
}

impl RecordStore for SqliteStore {
    fn create(&mut self, account: &Account) -> Result<(), BankError> {
        self.conn
            .execute(
                "INSERT INTO card (number, pin, balance) VALUES (?1, ?2, ?3)",
                params![account.card_id, account.pin, account.balance],
            )
            .map_err(|error| {
                if is_unique_violation(&error) {
                    BankError::duplicate_identifier(&account.card_id)
                } else {
                    BankError::from(error)
                }
            })?;
        Ok(())
    }

    fn read_by_id_and_pin(&self, card_id: &str, pin: &str) -> Result<Option<Account>, BankError> {
        let account = self
            .conn
            .query_row(
                "SELECT number, pin, balance FROM card WHERE number = ?1 AND pin = ?2",
                params![card_id, pin],
                Self::account_from_row,
            )
            .optional()?;
        Ok(account)
    }

    fn read(&self, card_id: &str) -> Result<Option<Account>, BankError> {
        let account = self
            .conn
            .query_row(
                "SELECT number, pin, balance FROM card WHERE number = ?1",
                params![card_id],
                Self::account_from_row,
            )
            .optional()?;
        Ok(account)
    }

    fn update_balance(&mut self, card_id: &str, delta: Balance) -> Result<(), BankError> {
        let tx = self.conn.transaction()?;
        apply_delta(&tx, card_id, delta, "update_balance")?;
        tx.commit()?;
        Ok(())
    }

    fn transfer(
        &mut self,
        source: &str,
        destination: &str,
        amount: Balance,
    ) -> Result<(), BankError> {
        if amount <= 0 {
            return Err(BankError::invalid_input(
                &amount.to_string(),
                "transfer amount must be positive",
            ));
        }

        // Dropping `tx` without commit rolls back
        let tx = self.conn.transaction()?;

        let balance =
            read_balance(&tx, source)?.ok_or_else(|| BankError::account_not_found(source))?;
        if balance < amount {
            return Err(BankError::insufficient_funds(balance, amount));
        }

        apply_delta(&tx, source, -amount, "transfer")?;
        apply_delta(&tx, destination, amount, "transfer")?;

        tx.commit()?;
        debug!(source, destination, amount, "transfer committed");
        Ok(())
    }

    fn delete(&mut self, card_id: &str) -> Result<(), BankError> {
        self.conn
            .execute("DELETE FROM card WHERE number = ?1", params![card_id])?;
        Ok(())
    }

    fn exists(&self, card_id: &str) -> Result<bool, BankError> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM card WHERE number = ?1",
                params![card_id],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn list_all(&self) -> Result<Vec<Account>, BankError> {
        let mut stmt = self
            .conn
            .prepare("SELECT number, pin, balance FROM card ORDER BY number")?;
        let accounts = stmt
            .query_map([], Self::account_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(accounts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const CARD_A: &str = "4000008449433403";
    const CARD_B: &str = "4000000000000002";

    fn store_with(balances: &[(&str, Balance)]) -> SqliteStore {
        let mut store = SqliteStore::open_in_memory().unwrap();
        for (card_id, balance) in balances {
            let mut account = Account::new(*card_id, "1234");
            account.balance = *balance;
            store.create(&account).unwrap();
        }
        store
    }

    #[test]
    fn test_create_and_read_back() {
        let store = store_with(&[(CARD_A, 42)]);

        let account = store.read(CARD_A).unwrap().unwrap();

        assert_eq!(account.card_id, CARD_A);
        assert_eq!(account.pin, "1234");
        assert_eq!(account.balance, 42);
    }

    #[test]
    fn test_leading_zeros_survive_storage() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.create(&Account::new(CARD_A, "0007")).unwrap();

        assert_eq!(store.read(CARD_A).unwrap().unwrap().pin, "0007");
        assert!(store.read_by_id_and_pin(CARD_A, "0007").unwrap().is_some());
        assert!(store.read_by_id_and_pin(CARD_A, "7").unwrap().is_none());
    }

    #[test]
    fn test_create_duplicate_maps_to_duplicate_identifier() {
        let mut store = store_with(&[(CARD_A, 0)]);

        let result = store.create(&Account::new(CARD_A, "9999"));

        assert_eq!(result, Err(BankError::duplicate_identifier(CARD_A)));
    }

    #[test]
    fn test_read_by_id_and_pin_requires_both() {
        let store = store_with(&[(CARD_A, 0)]);

        assert!(store.read_by_id_and_pin(CARD_A, "1234").unwrap().is_some());
        assert!(store.read_by_id_and_pin(CARD_A, "4321").unwrap().is_none());
        assert!(store.read_by_id_and_pin(CARD_B, "1234").unwrap().is_none());
    }

    #[test]
    fn test_update_balance() {
        let mut store = store_with(&[(CARD_A, 100)]);

        store.update_balance(CARD_A, -40).unwrap();

        assert_eq!(store.read(CARD_A).unwrap().unwrap().balance, 60);
        assert_eq!(
            store.update_balance(CARD_B, 1),
            Err(BankError::account_not_found(CARD_B))
        );
    }

    #[test]
    fn test_transfer_commits_both_sides() {
        let mut store = store_with(&[(CARD_A, 500), (CARD_B, 0)]);

        store.transfer(CARD_A, CARD_B, 500).unwrap();

        assert_eq!(store.read(CARD_A).unwrap().unwrap().balance, 0);
        assert_eq!(store.read(CARD_B).unwrap().unwrap().balance, 500);
    }

    #[test]
    fn test_transfer_insufficient_funds_rolls_back() {
        let mut store = store_with(&[(CARD_A, 500), (CARD_B, 0)]);

        let result = store.transfer(CARD_A, CARD_B, 600);

        assert_eq!(result, Err(BankError::insufficient_funds(500, 600)));
        assert_eq!(store.read(CARD_A).unwrap().unwrap().balance, 500);
        assert_eq!(store.read(CARD_B).unwrap().unwrap().balance, 0);
    }

    #[test]
    fn test_transfer_missing_destination_rolls_back_debit() {
        let mut store = store_with(&[(CARD_A, 500)]);

        let result = store.transfer(CARD_A, CARD_B, 100);

        assert_eq!(result, Err(BankError::account_not_found(CARD_B)));
        assert_eq!(store.read(CARD_A).unwrap().unwrap().balance, 500);
    }

    #[test]
    fn test_update_balance_overflow_keeps_row_readable() {
        let mut store = store_with(&[(CARD_A, Balance::MAX)]);

        let result = store.update_balance(CARD_A, 1);

        assert!(matches!(result, Err(BankError::ArithmeticOverflow { .. })));
        assert_eq!(store.read(CARD_A).unwrap().unwrap().balance, Balance::MAX);
        assert!(store.read_by_id_and_pin(CARD_A, "1234").unwrap().is_some());
    }

    #[test]
    fn test_transfer_overflow_on_credit_rolls_back() {
        let mut store = store_with(&[(CARD_A, 10), (CARD_B, Balance::MAX)]);

        let result = store.transfer(CARD_A, CARD_B, 5);

        assert!(matches!(result, Err(BankError::ArithmeticOverflow { .. })));
        assert_eq!(store.read(CARD_A).unwrap().unwrap().balance, 10);
        assert_eq!(store.read(CARD_B).unwrap().unwrap().balance, Balance::MAX);
    }

    #[test]
    fn test_delete_and_exists() {
        let mut store = store_with(&[(CARD_A, 0)]);
        assert!(store.exists(CARD_A).unwrap());

        store.delete(CARD_A).unwrap();
        store.delete(CARD_A).unwrap();

        assert!(!store.exists(CARD_A).unwrap());
    }

    #[test]
    fn test_list_all_sorted() {
        let store = store_with(&[(CARD_A, 1), (CARD_B, 2)]);

        let accounts = store.list_all().unwrap();

        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].card_id, CARD_B);
        assert_eq!(accounts[1].card_id, CARD_A);
    }

    #[test]
    fn test_records_persist_across_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("card.s3db");

        {
            let mut store = SqliteStore::open(&path).unwrap();
            let mut account = Account::new(CARD_A, "1234");
            account.balance = 250;
            store.create(&account).unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        let account = store.read_by_id_and_pin(CARD_A, "1234").unwrap().unwrap();
        assert_eq!(account.balance, 250);
    }

    #[test]
    fn test_other_constraint_failures_are_not_duplicates() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("card.s3db");
        Connection::open(&path)
            .unwrap()
            .execute(
                "CREATE TABLE card (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    number TEXT UNIQUE,
                    pin TEXT CHECK (length(pin) = 4),
                    balance INTEGER DEFAULT 0
                )",
                [],
            )
            .unwrap();
        let mut store = SqliteStore::open(&path).unwrap();

        let result = store.create(&Account::new(CARD_A, "12345"));

        assert!(matches!(result, Err(BankError::StoreFailure { .. })));
    }

    #[test]
    fn test_open_missing_directory_is_store_unavailable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("card.s3db");

        let result = SqliteStore::open(&path);

        assert!(matches!(result, Err(BankError::StoreUnavailable { .. })));
    }
}
