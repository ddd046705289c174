//! # Adapters Module
//!
//! Adapter implementations for the Credential Store subsystem.
//!
//! ## Modules
//!
//! - `storage`: `PoolMedium` implementations (JSON file, in-memory)
//! - `lock`: Pool file process locking (single writer process)

#[cfg(feature = "locking")]
pub mod lock;
pub mod storage;

#[cfg(feature = "locking")]
pub use lock::{LockError, PoolLock};
pub use storage::{InMemoryPoolMedium, JsonFilePoolMedium};
