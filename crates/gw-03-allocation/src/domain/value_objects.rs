//! # Allocation Value Objects

use serde::{Deserialize, Serialize};
use shared_types::{CredentialRecord, DeviceClass, PoolId, RequesterRef};

/// Credentials a requester may hold unless configured otherwise.
pub const DEFAULT_QUOTA_LIMIT: usize = 2;

/// Engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationConfig {
    /// Maximum delivered credentials per requester.
    pub quota_limit: usize,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            quota_limit: DEFAULT_QUOTA_LIMIT,
        }
    }
}

/// Slot picked at the start of a request.
///
/// Advisory only: nothing holds the slot until the commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    pub pool_id: PoolId,
    pub network_name: String,
}

impl From<&CredentialRecord> for Reservation {
    fn from(record: &CredentialRecord) -> Self {
        Self {
            pool_id: record.pool_id,
            network_name: record.network_name.clone(),
        }
    }
}

/// Everything needed to finish a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    /// Slot from the reservation.
    pub pool_id: PoolId,
    pub requester: RequesterRef,
    /// Document exactly as typed.
    pub raw_document: String,
    pub device_class: DeviceClass,
    pub display_name: Option<String>,
}

/// A credential that has just been committed to its requester.
#[derive(Clone, PartialEq, Eq)]
pub struct DeliveredCredential {
    pub pool_id: PoolId,
    pub network_name: String,
    pub secret: String,
    pub device_class: DeviceClass,
}

// Keep the secret out of Debug output (and therefore out of logs).
impl std::fmt::Debug for DeliveredCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeliveredCredential")
            .field("pool_id", &self.pool_id)
            .field("network_name", &self.network_name)
            .field("secret", &"<redacted>")
            .field("device_class", &self.device_class)
            .finish()
    }
}
