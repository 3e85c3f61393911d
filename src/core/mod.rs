//! Core business logic module
//!
//! This module contains the card bank components, leaves first:
//! - `luhn` - Luhn check digit computation and verification
//! - `generator` - Card number and PIN generation
//! - `traits` - Record store abstraction
//! - `directory` - Account creation, authentication and balance operations
//! - `session` - Logged-out / logged-in state machine

pub mod directory;
pub mod generator;
pub mod luhn;
pub mod session;
pub mod traits;

pub use directory::AccountDirectory;
pub use generator::{IdentifierGenerator, ISSUER_PREFIX};
pub use session::{SessionController, SessionState};
pub use traits::RecordStore;
