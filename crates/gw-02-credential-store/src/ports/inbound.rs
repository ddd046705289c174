//! # Inbound Ports (Driving Ports)
//!
//! The primary API for the Credential Store subsystem.

use shared_types::{Assignment, CredentialRecord, PoolId, RequesterRef};

use crate::domain::errors::StoreError;
use crate::domain::value_objects::PoolStats;

/// Primary API for the Credential Store subsystem.
///
/// Implementations must be safe to share between threads: every method
/// takes `&self`, and mutual exclusion of commits is the implementation's
/// job.
pub trait CredentialStoreApi: Send + Sync {
    /// Load the full pool from the backing medium.
    ///
    /// ## Errors
    ///
    /// - `StoreUnavailable`: the medium could not be read or decoded
    fn load(&self) -> Result<PoolStats, StoreError>;

    /// First unassigned record in pool order, or `None` when exhausted.
    ///
    /// Repeated calls without an intervening commit return the same record.
    fn find_first_unassigned(&self) -> Result<Option<CredentialRecord>, StoreError>;

    /// Number of records whose trimmed user reference equals `requester`.
    fn count_by_requester(&self, requester: &RequesterRef) -> Result<usize, StoreError>;

    /// Delivered records of `requester`, in pool order.
    fn issued_to(&self, requester: &RequesterRef) -> Result<Vec<CredentialRecord>, StoreError>;

    /// Commit an assignment to one slot and persist the whole pool.
    ///
    /// ## Atomicity
    ///
    /// Either every assignment field is filled and written, or nothing
    /// changes (in memory or in the medium).
    ///
    /// ## Errors
    ///
    /// - `StaleSlot`: the slot is no longer unassigned at commit time
    /// - `InvalidAssignment`: the assignment has no identity document
    /// - `StoreUnavailable`: the medium could not be read or written
    fn commit_assignment(
        &self,
        pool_id: PoolId,
        assignment: &Assignment,
    ) -> Result<CredentialRecord, StoreError>;

    /// Like `commit_assignment`, but refuses the commit if the requester
    /// already holds `limit` records. The count is taken inside the same
    /// critical section as the commit.
    ///
    /// ## Errors
    ///
    /// - `QuotaReached`: the requester holds `limit` or more records
    /// - every error of `commit_assignment`
    fn commit_within_quota(
        &self,
        pool_id: PoolId,
        assignment: &Assignment,
        limit: usize,
    ) -> Result<CredentialRecord, StoreError>;

    /// Occupancy counters.
    fn stats(&self) -> Result<PoolStats, StoreError>;
}
