//! # Value Objects
//!
//! Configuration and statistics for the Credential Store.

use serde::{Deserialize, Serialize};

/// How read operations obtain the pool state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadConsistency {
    /// Serve reads from the in-memory snapshot kept current by commits.
    /// Readers run concurrently.
    Snapshot,
    /// Reload the medium before every read and commit so out-of-band
    /// provisioning shows up. Reloads go through the writer gate.
    Refresh,
}

/// Store configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    pub read_consistency: ReadConsistency,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            read_consistency: ReadConsistency::Refresh,
        }
    }
}

impl StoreConfig {
    /// Configuration serving reads from memory.
    pub fn snapshot() -> Self {
        Self {
            read_consistency: ReadConsistency::Snapshot,
        }
    }
}

/// Pool occupancy counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolStats {
    pub total: usize,
    pub unassigned: usize,
    pub delivered: usize,
}
