//! State ID: digit count only.

use super::digits_of;

/// Accepted digit counts, inclusive.
pub const STATE_ID_DIGITS: std::ops::RangeInclusive<usize> = 7..=9;

/// Validate a state ID: 7 to 9 digits once punctuation is removed.
pub fn validate_state_id(raw: &str) -> bool {
    STATE_ID_DIGITS.contains(&digits_of(raw).len())
}
