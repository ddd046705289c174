//! # Error Types
//!
//! Defines error types raised by the shared data model.

use thiserror::Error;

use crate::entities::PoolId;

/// Errors raised when mutating a `CredentialRecord`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The record already carries an assignment.
    #[error("Slot {pool_id} is already assigned")]
    AlreadyAssigned { pool_id: PoolId },

    /// The assignment is missing its identity document.
    #[error("Assignment for slot {pool_id} has an empty identity document")]
    EmptyIdentity { pool_id: PoolId },
}
