//! Account-related types for the card bank
//!
//! This module defines the Account record stored for every issued card.

use serde::{Deserialize, Serialize};

/// Card number: 16 ASCII digits (issuer prefix, random body, check digit)
pub type CardId = String;

/// Balance in minor currency units
pub type Balance = i64;

/// A card account
///
/// Represents one issued card with its PIN and current balance.
/// Accounts are created by the directory with a zero balance and are
/// removed permanently when closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// The card number identifying this account
    ///
    /// Unique across every account ever created and Luhn-valid by construction.
    #[serde(rename = "number")]
    pub card_id: CardId,

    /// The 4-digit PIN, stored in plain text
    pub pin: String,

    /// Current balance in minor units
    ///
    /// Never negative after a completed transfer.
    pub balance: Balance,
}

impl Account {
    /// Create a new account with a zero balance
    ///
    /// # Arguments
    ///
    /// * `card_id` - The generated card number
    /// * `pin` - The generated PIN
    pub fn new(card_id: impl Into<CardId>, pin: impl Into<String>) -> Self {
        Account {
            card_id: card_id.into(),
            pin: pin.into(),
            balance: 0,
        }
    }

    /// Whether the supplied PIN matches this account's PIN exactly
    pub fn pin_matches(&self, pin: &str) -> bool {
        self.pin == pin
    }
}
