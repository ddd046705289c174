//! # Allocation Engine (gw-03)
//!
//! Orchestrates a credential issuance:
//!
//! ```text
//! Idle ──begin_request──→ SlotReserved ──complete_request(doc)──→ quota? ──→ document? ──→ commit
//!                                                                   │            │           │
//!                                                              QuotaExceeded  InvalidDocument  Delivered
//!                                                               (terminal)    (retry doc)    | StaleSlot
//!                                                                                            | StoreUnavailable
//! ```
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | 1 | Quota Before Everything | `service.rs` - quota counted before the document is looked at |
//! | 2 | Rejected Documents Are Free | `service.rs` - an invalid document neither commits nor counts |
//! | 3 | Advisory Reservation | `service.rs` - no lock between begin and complete; the store rechecks |
//! | 4 | One Outcome Per Failure | `domain/errors.rs` - every store error maps to exactly one variant |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Outcomes, quota policy, errors
//! - `ports/` - `AllocationApi` (inbound)
//! - `service.rs` - `AllocationEngine`

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::errors::AllocationError;
pub use domain::quota::QuotaPolicy;
pub use domain::value_objects::{
    AllocationConfig, CompletionRequest, DeliveredCredential, Reservation, DEFAULT_QUOTA_LIMIT,
};
pub use ports::inbound::AllocationApi;
pub use service::AllocationEngine;
