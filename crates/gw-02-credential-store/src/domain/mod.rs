//! # Domain Layer
//!
//! Pure pool logic for the Credential Store subsystem.
//!
//! ## Modules
//!
//! - `pool` - Ordered record set with allocation queries
//! - `row` - Mapping between records and persisted pool rows
//! - `value_objects` - Configuration and statistics
//! - `errors` - Domain error types

pub mod errors;
pub mod pool;
pub mod row;
pub mod value_objects;
