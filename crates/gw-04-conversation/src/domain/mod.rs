//! # Domain Layer
//!
//! - `command` - What a requester can ask for
//! - `reply` - Everything the controller can answer
//! - `session` - Per-requester state machine and its table
//! - `errors` - Delivery failures of the reply channel

pub mod command;
pub mod errors;
pub mod reply;
pub mod session;
