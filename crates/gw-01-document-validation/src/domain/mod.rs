//! # Domain Layer
//!
//! One module per document scheme plus the aggregate classifier.
//! No I/O, no state.

pub mod classifier;
pub mod national_id;
pub mod passport;
pub mod state_id;

/// Keep only ASCII digits, as numeric values.
pub(crate) fn digits_of(raw: &str) -> Vec<u32> {
    raw.chars().filter_map(|c| c.to_digit(10)).collect()
}
