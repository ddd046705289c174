//! Passport: two letters then 6 or 7 digits.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref PASSPORT: Regex =
        Regex::new(r"^[A-Za-z]{2}[0-9]{6,7}$").expect("passport pattern is valid");
}

/// Validate a passport number. The whole string must match; no separators.
pub fn validate_passport(raw: &str) -> bool {
    PASSPORT.is_match(raw)
}
