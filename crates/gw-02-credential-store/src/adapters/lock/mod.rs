//! # Pool File Locking
//!
//! Prevents two processes from writing the same pool file. In-process
//! writers are serialized by the service's writer gate; this covers the
//! process boundary the gate cannot see.
//!
//! ## Modules
//!
//! - `flock`: `PoolLock` implementation using fs2

mod flock;

pub use flock::{LockError, PoolLock};
