//! # Core Domain Entities
//!
//! Defines the credential pool entities.
//!
//! ## Clusters
//!
//! - **Pool**: `PoolId`, `CredentialRecord`, `DeliveryStatus`
//! - **Requester**: `RequesterRef`, `DeviceClass`, `Assignment`
//! - **Views**: `IssuedCredential`

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::RecordError;

// =============================================================================
// CLUSTER A: THE POOL
// =============================================================================

/// Position of a record in the pool (row key).
///
/// Stable for the lifetime of the pool: records are never inserted,
/// reordered or deleted by the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PoolId(pub usize);

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Delivery status of a credential record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeliveryStatus {
    /// Free for allocation.
    Unassigned,
    /// Handed out to a requester. Terminal.
    Delivered,
}

/// A single pre-provisioned WiFi credential and its assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    /// Row key.
    pub pool_id: PoolId,
    /// WiFi network this credential grants access to.
    pub network_name: String,
    /// Opaque credential value. Never changes after provisioning.
    secret: String,
    assigned_identity: Option<String>,
    assigned_user_ref: Option<String>,
    assigned_device_class: Option<String>,
    assigned_user_name: Option<String>,
}

/// Assignment columns as found in a persisted row.
///
/// Empty strings are treated the same as absent values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentFields {
    pub identity: Option<String>,
    pub user_ref: Option<String>,
    pub device_class: Option<String>,
    pub user_name: Option<String>,
}

impl CredentialRecord {
    /// Create a fresh, unassigned record.
    pub fn provisioned(
        pool_id: PoolId,
        network_name: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            pool_id,
            network_name: network_name.into(),
            secret: secret.into(),
            assigned_identity: None,
            assigned_user_ref: None,
            assigned_device_class: None,
            assigned_user_name: None,
        }
    }

    /// Rebuild a record from persisted columns.
    pub fn restore(
        pool_id: PoolId,
        network_name: impl Into<String>,
        secret: impl Into<String>,
        fields: AssignmentFields,
    ) -> Self {
        Self {
            pool_id,
            network_name: network_name.into(),
            secret: secret.into(),
            assigned_identity: non_empty(fields.identity),
            assigned_user_ref: non_empty(fields.user_ref),
            assigned_device_class: non_empty(fields.device_class),
            assigned_user_name: non_empty(fields.user_name),
        }
    }

    /// The credential value.
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Identity document stored at commit time, if any.
    pub fn assigned_identity(&self) -> Option<&str> {
        self.assigned_identity.as_deref()
    }

    /// Requester the record was delivered to, if any.
    pub fn assigned_user_ref(&self) -> Option<&str> {
        self.assigned_user_ref.as_deref()
    }

    /// Device category chosen by the requester, if any.
    pub fn assigned_device_class(&self) -> Option<&str> {
        self.assigned_device_class.as_deref()
    }

    /// Display name of the requester, if the channel supplied one.
    pub fn assigned_user_name(&self) -> Option<&str> {
        self.assigned_user_name.as_deref()
    }

    /// Current status.
    ///
    /// A row with an identity document is never allocatable again, so the
    /// document column alone decides. Legacy rows with a document but no
    /// user reference are deliberately `Delivered` to nobody: they are not
    /// allocatable and count toward no requester's quota.
    pub fn status(&self) -> DeliveryStatus {
        if self.assigned_identity.is_some() {
            DeliveryStatus::Delivered
        } else {
            DeliveryStatus::Unassigned
        }
    }

    /// True if the record can still be allocated.
    pub fn is_unassigned(&self) -> bool {
        self.status() == DeliveryStatus::Unassigned
    }

    /// True if the record was delivered to `requester` (exact match after trim).
    pub fn is_issued_to(&self, requester: &RequesterRef) -> bool {
        self.assigned_user_ref
            .as_deref()
            .map(|user| user.trim() == requester.as_str())
            .unwrap_or(false)
    }

    /// Fill every assignment field in one step.
    ///
    /// # Errors
    ///
    /// - `AlreadyAssigned` if the record is not `Unassigned`
    /// - `EmptyIdentity` if the assignment carries a blank document
    pub fn assign(&mut self, assignment: &Assignment) -> Result<(), RecordError> {
        if !self.is_unassigned() {
            return Err(RecordError::AlreadyAssigned {
                pool_id: self.pool_id,
            });
        }
        let identity = assignment.identity.trim();
        if identity.is_empty() {
            return Err(RecordError::EmptyIdentity {
                pool_id: self.pool_id,
            });
        }

        self.assigned_identity = Some(identity.to_string());
        self.assigned_user_ref = Some(assignment.requester.as_str().to_string());
        self.assigned_device_class = Some(assignment.device_class.label().to_string());
        self.assigned_user_name = assignment
            .display_name
            .as_ref()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());
        Ok(())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// =============================================================================
// CLUSTER B: THE REQUESTER
// =============================================================================

/// Opaque identity of whoever talks to the channel.
///
/// Maps 1:1 to an issuance quota. Stored trimmed; never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RequesterRef(String);

impl RequesterRef {
    /// Build a requester reference, trimming surrounding whitespace.
    ///
    /// Returns `None` for a blank identifier.
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequesterRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Device category offered to the requester.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceClass {
    Phone,
    OtherDevice,
}

impl DeviceClass {
    /// Every selectable device class, in prompt order.
    pub const ALL: [DeviceClass; 2] = [DeviceClass::Phone, DeviceClass::OtherDevice];

    /// Label written to the pool's `dispositivos` column.
    pub fn label(&self) -> &'static str {
        match self {
            DeviceClass::Phone => "Celular",
            DeviceClass::OtherDevice => "Outros Dispositivos",
        }
    }

    /// Parse a selection, accepting the pool label, the variant name or the
    /// 1-based prompt index. Case-insensitive.
    pub fn parse(choice: &str) -> Option<Self> {
        let choice = choice.trim();
        Self::ALL.into_iter().enumerate().find_map(|(index, class)| {
            let matches = choice.eq_ignore_ascii_case(class.label())
                || choice.eq_ignore_ascii_case(class.name())
                || choice == (index + 1).to_string();
            matches.then_some(class)
        })
    }

    fn name(&self) -> &'static str {
        match self {
            DeviceClass::Phone => "phone",
            DeviceClass::OtherDevice => "other",
        }
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything written into a record when it is committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// Identity document, as typed by the requester (trimmed on assign).
    pub identity: String,
    pub requester: RequesterRef,
    pub device_class: DeviceClass,
    pub display_name: Option<String>,
}

// =============================================================================
// CLUSTER C: VIEWS
// =============================================================================

/// A delivered credential as shown back to its requester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedCredential {
    pub pool_id: PoolId,
    pub network_name: String,
    pub secret: String,
    pub device_class: Option<String>,
    pub status: DeliveryStatus,
}

impl From<&CredentialRecord> for IssuedCredential {
    fn from(record: &CredentialRecord) -> Self {
        Self {
            pool_id: record.pool_id,
            network_name: record.network_name.clone(),
            secret: record.secret.clone(),
            device_class: record.assigned_device_class.clone(),
            status: record.status(),
        }
    }
}
