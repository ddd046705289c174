//! # Document Classifier
//!
//! Aggregates the three schemes into a single `(kind, valid)` answer.

use serde::{Deserialize, Serialize};

use super::digits_of;
use super::national_id::{validate_national_id, NATIONAL_ID_LEN};
use super::passport::validate_passport;
use super::state_id::validate_state_id;

/// Document scheme an identity string belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    NationalId,
    StateId,
    Passport,
    Unknown,
}

/// Result of classifying a raw identity string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub kind: DocumentKind,
    pub valid: bool,
}

impl Classification {
    fn accepted(kind: DocumentKind) -> Self {
        Self { kind, valid: true }
    }

    fn rejected(kind: DocumentKind) -> Self {
        Self { kind, valid: false }
    }
}

/// Classify and validate a raw identity string.
///
/// Surrounding whitespace is ignored. The passport pattern is tried first
/// because it is the most specific (a passport also strips down to a
/// plausible state ID). When no scheme accepts, `kind` is a best guess from
/// the input's shape.
pub fn classify(raw: &str) -> Classification {
    let raw = raw.trim();

    if validate_passport(raw) {
        return Classification::accepted(DocumentKind::Passport);
    }
    if validate_national_id(raw) {
        return Classification::accepted(DocumentKind::NationalId);
    }
    if validate_state_id(raw) {
        return Classification::accepted(DocumentKind::StateId);
    }

    Classification::rejected(guess_kind(raw))
}

/// True if any scheme accepts the input.
pub fn is_valid_document(raw: &str) -> bool {
    let raw = raw.trim();
    validate_national_id(raw) || validate_state_id(raw) || validate_passport(raw)
}

fn guess_kind(raw: &str) -> DocumentKind {
    if raw.is_empty() {
        return DocumentKind::Unknown;
    }
    if raw.chars().take(2).all(|c| c.is_ascii_alphabetic()) {
        return DocumentKind::Passport;
    }
    match digits_of(raw).len() {
        NATIONAL_ID_LEN => DocumentKind::NationalId,
        _ => DocumentKind::Unknown,
    }
}
