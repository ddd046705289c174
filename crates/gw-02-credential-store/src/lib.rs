//! # Credential Store (gw-02)
//!
//! The authoritative record of which WiFi credentials exist and who holds
//! them. Wraps a backing medium that has no transactional guarantees of its
//! own (a tabular file) and adds them.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | 1 | Write-Once Assignment | `CredentialRecord::assign` rejects assigned slots |
//! | 2 | Single Writer | `service.rs` - every commit and reload holds the writer gate |
//! | 3 | Check At Commit | `service.rs` - slot status re-read inside the gate |
//! | 4 | No Partial Commit | `service.rs` - snapshot swapped only after persist succeeds |
//! | 5 | Stable Order | `domain/pool.rs` - `PoolId` is the row position |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Pool model, row mapping, errors, configuration
//! - `ports/` - `CredentialStoreApi` (inbound), `PoolMedium` (outbound)
//! - `adapters/` - JSON file and in-memory media, process lock
//! - `service.rs` - `CredentialStoreService`
//!
//! ## Usage
//!
//! ```ignore
//! use gw_02_credential_store::{CredentialStoreService, JsonFilePoolMedium, StoreConfig};
//!
//! let store = CredentialStoreService::open(
//!     JsonFilePoolMedium::new("pool.json"),
//!     StoreConfig::default(),
//! )?;
//! let slot = store.find_first_unassigned()?;
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export key types for convenience
pub use adapters::{InMemoryPoolMedium, JsonFilePoolMedium};
#[cfg(feature = "locking")]
pub use adapters::{LockError, PoolLock};
pub use domain::errors::{MediumError, StoreError};
pub use domain::pool::{CredentialPool, PoolEntry};
pub use domain::row::{PoolRow, DELIVERED_LABEL};
pub use domain::value_objects::{PoolStats, ReadConsistency, StoreConfig};
pub use ports::inbound::CredentialStoreApi;
pub use ports::outbound::PoolMedium;
pub use service::CredentialStoreService;
