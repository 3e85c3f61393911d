//! Card number and PIN generation
//!
//! Every card number is the fixed issuer prefix, nine uniformly random
//! digits and a Luhn check digit computed over the first fifteen.

use crate::core::luhn;
use crate::types::{Account, BankError, CardId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Issuer prefix shared by every generated card number
pub const ISSUER_PREFIX: &str = "400000";

/// Number of random digits between the prefix and the check digit
pub const BODY_LEN: usize = 9;

/// Length of a full card number
pub const CARD_ID_LEN: usize = ISSUER_PREFIX.len() + BODY_LEN + 1;

/// Length of a PIN
pub const PIN_LEN: usize = 4;

/// Generates card numbers, PINs and fresh account records
///
/// Generic over the random source so tests can use a seeded generator.
/// Production code uses [`IdentifierGenerator::from_entropy`].
#[derive(Debug, Clone)]
pub struct IdentifierGenerator<R: Rng = StdRng> {
    rng: R,
}

impl IdentifierGenerator<StdRng> {
    /// Create a generator seeded from the operating system's entropy source
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Create a deterministic generator for tests and benchmarks
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> IdentifierGenerator<R> {
    /// Wrap an existing random source
    pub fn new(rng: R) -> Self {
        IdentifierGenerator { rng }
    }

    /// Generate a 16-digit, Luhn-valid card number
    ///
    /// # Errors
    ///
    /// Only fails if the check digit computation rejects the payload, which
    /// cannot happen for generated digits.
    pub fn generate_card_id(&mut self) -> Result<CardId, BankError> {
        let body: u32 = self.rng.gen_range(0..1_000_000_000);
        let payload = format!("{}{:0width$}", ISSUER_PREFIX, body, width = BODY_LEN);

        let digits = luhn::parse_digits(&payload)?;
        let check = luhn::compute_check_digit(&digits)?;

        Ok(format!("{}{}", payload, check))
    }

    /// Generate a 4-digit PIN, zero-padded
    pub fn generate_pin(&mut self) -> String {
        let pin: u16 = self.rng.gen_range(0..10_000);
        format!("{:0width$}", pin, width = PIN_LEN)
    }

    /// Generate the record for a new account
    ///
    /// Balance is always zero: new accounts never start funded.
    pub fn generate_account_seed(&mut self) -> Result<Account, BankError> {
        let card_id = self.generate_card_id()?;
        let pin = self.generate_pin();
        Ok(Account::new(card_id, pin))
    }
}
