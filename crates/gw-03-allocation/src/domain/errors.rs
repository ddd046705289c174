//! # Allocation Errors
//!
//! Every way an issuance can end other than `Delivered`. Each variant maps
//! to exactly one user-facing reply.

use gw_01_document_validation::DocumentKind;
use gw_02_credential_store::StoreError;
use shared_types::PoolId;
use thiserror::Error;

/// Allocation failure outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    /// Every credential in the pool has been delivered.
    #[error("No credentials left in the pool")]
    NoSlotsAvailable,

    /// The requester already holds the maximum number of credentials.
    #[error("Issuance quota reached: {issued} issued, limit {limit}")]
    QuotaExceeded { issued: usize, limit: usize },

    /// The identity document failed every scheme. Recoverable.
    #[error("Identity document rejected (looked like {kind:?})")]
    InvalidDocument { kind: DocumentKind },

    /// Another request committed the reserved slot first.
    #[error("Slot {pool_id} was claimed by another request")]
    StaleSlot { pool_id: PoolId },

    /// The pool could not be read or written.
    #[error("Credential store unavailable: {message}")]
    StoreUnavailable { message: String },
}

impl AllocationError {
    /// True if the session must end. Only a rejected document lets the
    /// requester try again in the same session.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, AllocationError::InvalidDocument { .. })
    }
}

impl From<StoreError> for AllocationError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::StoreUnavailable { message } => AllocationError::StoreUnavailable { message },
            StoreError::StaleSlot { pool_id } => AllocationError::StaleSlot { pool_id },
            StoreError::QuotaReached { issued, limit, .. } => {
                AllocationError::QuotaExceeded { issued, limit }
            }
            StoreError::InvalidAssignment { .. } => AllocationError::InvalidDocument {
                kind: DocumentKind::Unknown,
            },
        }
    }
}
