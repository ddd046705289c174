//! # Domain Errors
//!
//! Error types for the Credential Store subsystem.
//!
//! Every backing-medium failure collapses into `StoreUnavailable`; callers
//! are not expected to tell a missing file from a full disk.

use shared_types::{PoolId, RecordError};
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The backing medium could not be read or written.
    #[error("Credential store unavailable: {message}")]
    StoreUnavailable { message: String },

    /// The slot was claimed (or vanished) between selection and commit.
    #[error("Slot {pool_id} is no longer available")]
    StaleSlot { pool_id: PoolId },

    /// The requester already holds `limit` records at commit time.
    #[error("Requester {requester} holds {issued} credentials, limit {limit}")]
    QuotaReached {
        requester: String,
        issued: usize,
        limit: usize,
    },

    /// The assignment itself is unusable.
    #[error("Invalid assignment for slot {pool_id}: {reason}")]
    InvalidAssignment { pool_id: PoolId, reason: String },
}

impl From<RecordError> for StoreError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::AlreadyAssigned { pool_id } => StoreError::StaleSlot { pool_id },
            RecordError::EmptyIdentity { pool_id } => StoreError::InvalidAssignment {
                pool_id,
                reason: err.to_string(),
            },
        }
    }
}

/// Backing medium errors.
#[derive(Debug, Clone, Error)]
pub enum MediumError {
    /// I/O error during read/write.
    #[error("Pool medium I/O error: {message}")]
    Io { message: String },

    /// The medium's content could not be decoded.
    #[error("Pool medium corruption: {message}")]
    Corrupt { message: String },
}

impl From<MediumError> for StoreError {
    fn from(err: MediumError) -> Self {
        StoreError::StoreUnavailable {
            message: err.to_string(),
        }
    }
}
