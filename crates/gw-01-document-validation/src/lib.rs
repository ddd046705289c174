//! # Document Validation (gw-01)
//!
//! Pure functions that classify an identity string and validate it against
//! three document schemes.
//!
//! ## Schemes
//!
//! | Kind | Rule |
//! |------|------|
//! | `NationalId` | 11 digits after stripping punctuation, two modulo-11 check digits, not all digits equal |
//! | `StateId` | 7 to 9 digits after stripping punctuation |
//! | `Passport` | two letters followed by 6 or 7 digits, case-insensitive, nothing else |
//!
//! A document is acceptable when ANY scheme accepts it. The schemes are
//! independent predicates, so evaluation order never changes the answer.
//!
//! ## Usage
//!
//! ```
//! use gw_01_document_validation::{classify, is_valid_document, DocumentKind};
//!
//! assert!(is_valid_document("529.982.247-25"));
//! assert_eq!(classify("AB123456").kind, DocumentKind::Passport);
//! ```

pub mod domain;

pub use domain::classifier::{classify, is_valid_document, Classification, DocumentKind};
pub use domain::national_id::validate_national_id;
pub use domain::passport::validate_passport;
pub use domain::state_id::validate_state_id;
