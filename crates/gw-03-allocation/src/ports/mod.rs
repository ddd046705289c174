//! # Ports
//!
//! - `inbound` - `AllocationApi`, driven by the conversation layer

pub mod inbound;
