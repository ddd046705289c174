//! # Guest-WiFi Runtime Library
//!
//! Exposes the runtime's building blocks for testing. The entry point is
//! the `main.rs` binary.
//!
//! ## Modules
//!
//! - `container/` - Configuration and service wiring
//! - `adapters/` - Console channel (line parser, stdout replies)
//! - `runtime` - Inbound event loop

pub mod adapters;
pub mod container;
pub mod runtime;

pub use container::{ConfigError, RuntimeConfig, ServiceContainer, StartupError};
pub use runtime::{GuestWifiRuntime, RunSummary, RuntimeError};
