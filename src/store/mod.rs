//! Record store adapters
//!
//! Implementations of [`crate::core::traits::RecordStore`]:
//! - `memory` - HashMap-backed store, nothing persisted
//! - `sqlite` - SQLite-backed store with transactional transfers

pub mod memory;
pub mod sqlite;

pub use memory::InMemoryStore;
pub use sqlite::SqliteStore;
