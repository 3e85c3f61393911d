//! Luhn checksum engine
//!
//! Computes and verifies the Luhn check digit used by every card number the
//! bank issues. Doubling starts at index 0 of the payload (scanning left to
//! right) in both `compute_check_digit` and `verify`; a generated identifier
//! always verifies only because the two passes share that parity.
//!
//! All functions are pure and reject malformed input with
//! `BankError::InvalidInput` instead of computing a meaningless digit.

use crate::types::BankError;

/// Parse a string of ASCII digits into their numeric values
///
/// # Errors
///
/// Returns `InvalidInput` if the string is empty or contains anything other
/// than `0`-`9`.
pub fn parse_digits(input: &str) -> Result<Vec<u8>, BankError> {
    if input.is_empty() {
        return Err(BankError::invalid_input(input, "expected at least one digit"));
    }

    input
        .bytes()
        .map(|byte| match byte {
            b'0'..=b'9' => Ok(byte - b'0'),
            _ => Err(BankError::invalid_input(input, "expected only digits")),
        })
        .collect()
}

/// Apply the Luhn transformation to one payload digit
///
/// Digits at even indices are doubled, and doubled values of 10 or more have
/// 9 subtracted.
fn transform_digit(index: usize, digit: u8) -> u32 {
    let digit = u32::from(digit);
    if index % 2 == 0 {
        let doubled = digit * 2;
        if doubled > 9 {
            doubled - 9
        } else {
            doubled
        }
    } else {
        digit
    }
}

fn transformed_sum(payload: &[u8]) -> u32 {
    payload
        .iter()
        .enumerate()
        .map(|(index, &digit)| transform_digit(index, digit))
        .sum()
}

/// Compute the check digit that makes `payload` + digit Luhn-valid
///
/// # Arguments
///
/// * `payload` - Digit values (0-9), excluding the check digit
///
/// # Returns
///
/// The check digit `(10 - sum % 10) % 10`
///
/// # Errors
///
/// Returns `InvalidInput` if the payload is empty or holds a value above 9.
pub fn compute_check_digit(payload: &[u8]) -> Result<u8, BankError> {
    if payload.is_empty() {
        return Err(BankError::invalid_input("", "expected at least one digit"));
    }
    if let Some(bad) = payload.iter().find(|&&digit| digit > 9) {
        return Err(BankError::invalid_input(
            &bad.to_string(),
            "payload values must be single digits",
        ));
    }

    let sum = transformed_sum(payload);
    // sum % 10 < 10, so the result always fits a digit
    Ok(((10 - sum % 10) % 10) as u8)
}

/// Verify a full digit string whose last digit is the claimed check digit
///
/// # Errors
///
/// Returns `InvalidInput` if the string is empty or contains non-digits.
pub fn verify(full: &str) -> Result<bool, BankError> {
    let digits = parse_digits(full)?;
    let (payload, check) = digits.split_at(digits.len() - 1);

    let total = transformed_sum(payload) + u32::from(check[0]);
    Ok(total % 10 == 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use rstest::rstest;

    fn digits_to_string(digits: &[u8]) -> String {
        digits.iter().map(|d| char::from(b'0' + d)).collect()
    }

    #[rstest]
    #[case::issued_example("400000844943340", 3)]
    #[case::all_zero_body("400000000000000", 2)]
    #[case::single_digit("5", 9)]
    #[case::sum_already_multiple_of_ten("91", 0)]
    fn test_compute_check_digit_known_values(#[case] payload: &str, #[case] expected: u8) {
        let digits = parse_digits(payload).unwrap();
        assert_eq!(compute_check_digit(&digits).unwrap(), expected);
    }

    #[rstest]
    #[case::valid("4000008449433403", true)]
    #[case::valid_zero_body("4000000000000002", true)]
    #[case::wrong_check_digit("4000008449433404", false)]
    #[case::altered_body("4000008449433413", false)]
    #[case::single_zero("0", true)]
    fn test_verify_known_values(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(verify(input).unwrap(), expected);
    }

    #[rstest]
    #[case::empty("")]
    #[case::letters("40000084494334O3")]
    #[case::whitespace("4000 0084 4943 3403")]
    #[case::sign("-4000008449433403")]
    fn test_verify_rejects_malformed_input(#[case] input: &str) {
        assert!(matches!(verify(input), Err(BankError::InvalidInput { .. })));
    }

    #[test]
    fn test_compute_check_digit_rejects_empty_payload() {
        assert!(matches!(
            compute_check_digit(&[]),
            Err(BankError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_compute_check_digit_rejects_non_digit_values() {
        assert!(matches!(
            compute_check_digit(&[4, 0, 12]),
            Err(BankError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_round_trip_for_random_payloads() {
        let mut rng = StdRng::seed_from_u64(43);

        for _ in 0..10_000 {
            let payload: Vec<u8> = (0..15).map(|_| rng.gen_range(0..10)).collect();
            let check = compute_check_digit(&payload).unwrap();

            let mut full = payload.clone();
            full.push(check);
            assert!(
                verify(&digits_to_string(&full)).unwrap(),
                "payload {} with check digit {} failed verification",
                digits_to_string(&payload),
                check
            );
        }
    }

    #[test]
    fn test_every_single_digit_alteration_is_detected() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let mut full: Vec<u8> = (0..15).map(|_| rng.gen_range(0..10)).collect();
            let check = compute_check_digit(&full).unwrap();
            full.push(check);

            for position in 0..full.len() {
                for replacement in 0..10u8 {
                    if replacement == full[position] {
                        continue;
                    }
                    let mut altered = full.clone();
                    altered[position] = replacement;
                    assert!(
                        !verify(&digits_to_string(&altered)).unwrap(),
                        "alteration at position {} to {} went undetected in {}",
                        position,
                        replacement,
                        digits_to_string(&full)
                    );
                }
            }
        }
    }
}
