//! # Ports Layer
//!
//! Defines the port traits for the Credential Store subsystem.
//!
//! ## Hexagonal Architecture
//!
//! - `inbound.rs` - Driving ports (API exposed to the allocation engine)
//! - `outbound.rs` - Driven ports (the backing medium)

pub mod inbound;
pub mod outbound;
