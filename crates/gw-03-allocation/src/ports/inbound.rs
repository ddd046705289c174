//! # Inbound Ports (Driving Ports)

use shared_types::{IssuedCredential, RequesterRef};

use crate::domain::errors::AllocationError;
use crate::domain::value_objects::{CompletionRequest, DeliveredCredential, Reservation};

/// Primary API for the Allocation subsystem.
///
/// Blocking: every call may touch the backing medium.
pub trait AllocationApi: Send + Sync {
    /// Pick the first free slot for `requester`.
    ///
    /// ## Errors
    ///
    /// - `NoSlotsAvailable`: every slot is delivered
    /// - `StoreUnavailable`: the pool could not be read
    fn begin_request(&self, requester: &RequesterRef) -> Result<Reservation, AllocationError>;

    /// Finish a request: quota, then document, then commit.
    ///
    /// ## Errors
    ///
    /// - `QuotaExceeded`: checked first, before the document is looked at
    /// - `InvalidDocument`: nothing was committed; the caller may retry
    /// - `StaleSlot`: the reserved slot was taken in the meantime
    /// - `StoreUnavailable`: the pool could not be read or written
    fn complete_request(
        &self,
        request: &CompletionRequest,
    ) -> Result<DeliveredCredential, AllocationError>;

    /// Credentials already delivered to `requester`, in pool order.
    fn issued_credentials(
        &self,
        requester: &RequesterRef,
    ) -> Result<Vec<IssuedCredential>, AllocationError>;
}
