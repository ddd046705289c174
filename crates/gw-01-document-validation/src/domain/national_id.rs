//! National ID (11-digit, two check digits).

use super::digits_of;

/// Number of digits in a national ID.
pub const NATIONAL_ID_LEN: usize = 11;

/// Validate a national ID number.
///
/// Punctuation is ignored. The number is rejected when it does not have
/// exactly 11 digits, when every digit is the same, or when either check
/// digit does not match.
pub fn validate_national_id(raw: &str) -> bool {
    let digits = digits_of(raw);
    if digits.len() != NATIONAL_ID_LEN {
        return false;
    }
    if digits.iter().all(|d| *d == digits[0]) {
        return false;
    }

    (9..NATIONAL_ID_LEN).all(|position| check_digit(&digits, position) == digits[position])
}

/// Check digit for `position`, computed from every digit before it.
fn check_digit(digits: &[u32], position: usize) -> u32 {
    let weight_base = position as u32 + 1;
    let sum: u32 = digits[..position]
        .iter()
        .enumerate()
        .map(|(k, d)| d * (weight_base - k as u32))
        .sum();
    ((sum * 10) % 11) % 10
}
