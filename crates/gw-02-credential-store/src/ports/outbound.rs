//! # Outbound Ports (Driven Ports)
//!
//! Dependencies required by the Credential Store service.

use crate::domain::errors::MediumError;
use crate::domain::row::PoolRow;

/// Abstract interface for the medium holding the pool.
///
/// The medium is assumed to offer no transactions and no compare-and-swap:
/// `persist` overwrites everything. The service serializes writers.
///
/// Production: `JsonFilePoolMedium`
/// Testing: `InMemoryPoolMedium`
pub trait PoolMedium: Send + Sync {
    /// Read every row, in stored order.
    fn load(&self) -> Result<Vec<PoolRow>, MediumError>;

    /// Replace the stored rows.
    fn persist(&self, rows: &[PoolRow]) -> Result<(), MediumError>;

    /// Short human-readable location, for logs.
    fn describe(&self) -> String;
}
