//! # Domain Layer
//!
//! - `value_objects` - Reservation, completion request/result, configuration
//! - `quota` - Per-requester issuance limit
//! - `errors` - Allocation outcome taxonomy

pub mod errors;
pub mod quota;
pub mod value_objects;
