//! # Credential Pool
//!
//! Ordered set of credential records, as loaded from the medium.
//!
//! ## Invariants Enforced
//!
//! - Row order is allocation priority; `PoolId` is the row position.
//! - Records are never added, removed or reordered here.
//! - `assign()` is the only mutation, and it goes through
//!   `CredentialRecord::assign` (write-once).

use serde_json::{Map, Value};
use shared_types::{
    Assignment, AssignmentFields, CredentialRecord, DeliveryStatus, PoolId, RequesterRef,
};

use super::errors::StoreError;
use super::row::{PoolRow, DELIVERED_LABEL};
use super::value_objects::PoolStats;

/// A record plus the row data the domain does not model.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolEntry {
    pub record: CredentialRecord,
    /// Status label as found in the medium.
    status_label: String,
    /// Unknown columns, written back untouched.
    extra: Map<String, Value>,
}

/// The full pool.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CredentialPool {
    entries: Vec<PoolEntry>,
}

impl CredentialPool {
    /// Build a pool from persisted rows, numbering them in order.
    pub fn from_rows(rows: Vec<PoolRow>) -> Self {
        let entries = rows
            .into_iter()
            .enumerate()
            .map(|(index, row)| PoolEntry {
                record: CredentialRecord::restore(
                    PoolId(index),
                    row.network_name,
                    row.secret,
                    AssignmentFields {
                        identity: Some(row.identity),
                        user_ref: Some(row.user_ref),
                        device_class: Some(row.device_class),
                        user_name: Some(row.user_name),
                    },
                ),
                status_label: row.status,
                extra: row.extra,
            })
            .collect();
        Self { entries }
    }

    /// Rows to persist, in pool order.
    pub fn to_rows(&self) -> Vec<PoolRow> {
        self.entries
            .iter()
            .map(|entry| {
                let record = &entry.record;
                PoolRow {
                    network_name: record.network_name.clone(),
                    secret: record.secret().to_string(),
                    identity: record.assigned_identity().unwrap_or_default().to_string(),
                    device_class: record.assigned_device_class().unwrap_or_default().to_string(),
                    status: entry.status_label.clone(),
                    user_ref: record.assigned_user_ref().unwrap_or_default().to_string(),
                    user_name: record.assigned_user_name().unwrap_or_default().to_string(),
                    extra: entry.extra.clone(),
                }
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All records in pool order.
    pub fn records(&self) -> impl Iterator<Item = &CredentialRecord> {
        self.entries.iter().map(|entry| &entry.record)
    }

    /// Look up a record by its row key.
    pub fn get(&self, pool_id: PoolId) -> Option<&CredentialRecord> {
        self.entries.get(pool_id.0).map(|entry| &entry.record)
    }

    /// First unassigned record in pool order.
    pub fn first_unassigned(&self) -> Option<&CredentialRecord> {
        self.records().find(|record| record.is_unassigned())
    }

    /// Number of records carrying `requester` as their user reference.
    pub fn count_issued_to(&self, requester: &RequesterRef) -> usize {
        self.records()
            .filter(|record| record.is_issued_to(requester))
            .count()
    }

    /// Delivered records of `requester`, in pool order.
    pub fn issued_to(&self, requester: &RequesterRef) -> Vec<&CredentialRecord> {
        self.records()
            .filter(|record| {
                record.status() == DeliveryStatus::Delivered && record.is_issued_to(requester)
            })
            .collect()
    }

    /// Assign a slot.
    ///
    /// # Errors
    ///
    /// - `StaleSlot` if the slot does not exist or is already assigned
    /// - `InvalidAssignment` if the assignment has no identity
    pub fn assign(
        &mut self,
        pool_id: PoolId,
        assignment: &Assignment,
    ) -> Result<&CredentialRecord, StoreError> {
        let entry = self
            .entries
            .get_mut(pool_id.0)
            .ok_or(StoreError::StaleSlot { pool_id })?;

        entry.record.assign(assignment)?;
        entry.status_label = DELIVERED_LABEL.to_string();
        Ok(&entry.record)
    }

    /// Occupancy counters.
    pub fn stats(&self) -> PoolStats {
        let delivered = self
            .records()
            .filter(|record| record.status() == DeliveryStatus::Delivered)
            .count();
        PoolStats {
            total: self.len(),
            unassigned: self.len() - delivered,
            delivered,
        }
    }
}
