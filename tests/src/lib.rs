//! # Guest-WiFi Test Suite
//!
//! Cross-crate tests that need more than one subsystem.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── flows.rs        # Conversation → allocation → store, end to end
//!     ├── concurrency.rs  # Many threads, one pool
//!     └── file_pool.rs    # JSON pool file on disk, runtime wiring
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p gw-tests
//! cargo test -p gw-tests integration::concurrency
//! ```

pub mod integration;
