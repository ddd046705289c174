//! Per-requester issuance limit.

use super::errors::AllocationError;

/// Maximum credentials a single requester may hold over the pool's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaPolicy {
    limit: usize,
}

impl QuotaPolicy {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Reject when `issued` already reached the limit.
    pub fn check(&self, issued: usize) -> Result<(), AllocationError> {
        if issued >= self.limit {
            return Err(AllocationError::QuotaExceeded {
                issued,
                limit: self.limit,
            });
        }
        Ok(())
    }

    /// Credentials the requester may still receive.
    pub fn remaining(&self, issued: usize) -> usize {
        self.limit.saturating_sub(issued)
    }
}
