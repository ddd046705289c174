//! # Shared Types Crate
//!
//! This crate contains the credential pool data model used by every
//! Guest-WiFi subsystem.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `CredentialRecord` is defined once and shared
//!   by the store, the allocation engine and the conversation controller.
//! - **Write-Once Assignment**: a record's assignment fields can only go from
//!   empty to filled, through `CredentialRecord::assign`.
//! - **Immutable Secret**: the credential secret has no setter.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
