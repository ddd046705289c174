//! # Allocation Engine
//!
//! Implements `AllocationApi` on top of any `CredentialStoreApi`.
//!
//! Holds no state between `begin_request` and `complete_request`; the
//! reservation travels with the caller and the store settles races at
//! commit time.

use gw_01_document_validation::classify;
use gw_02_credential_store::CredentialStoreApi;
use shared_types::{Assignment, IssuedCredential, RequesterRef};
use tracing::{debug, info, instrument, warn};

use crate::domain::errors::AllocationError;
use crate::domain::quota::QuotaPolicy;
use crate::domain::value_objects::{
    AllocationConfig, CompletionRequest, DeliveredCredential, Reservation,
};
use crate::ports::inbound::AllocationApi;

/// The Allocation Engine.
pub struct AllocationEngine<S: CredentialStoreApi> {
    store: S,
    config: AllocationConfig,
    quota: QuotaPolicy,
}

impl<S: CredentialStoreApi> AllocationEngine<S> {
    pub fn new(store: S, config: AllocationConfig) -> Self {
        Self {
            store,
            quota: QuotaPolicy::new(config.quota_limit),
            config,
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &AllocationConfig {
        &self.config
    }
}

impl<S: CredentialStoreApi> AllocationApi for AllocationEngine<S> {
    #[instrument(skip_all, fields(requester = %requester))]
    fn begin_request(&self, requester: &RequesterRef) -> Result<Reservation, AllocationError> {
        let Some(slot) = self.store.find_first_unassigned()? else {
            warn!("Credential pool exhausted");
            return Err(AllocationError::NoSlotsAvailable);
        };

        debug!(pool_id = %slot.pool_id, network = %slot.network_name, "Slot reserved");
        Ok(Reservation::from(&slot))
    }

    #[instrument(
        skip_all,
        fields(requester = %request.requester, pool_id = %request.pool_id)
    )]
    fn complete_request(
        &self,
        request: &CompletionRequest,
    ) -> Result<DeliveredCredential, AllocationError> {
        let issued = self.store.count_by_requester(&request.requester)?;
        if let Err(err) = self.quota.check(issued) {
            info!(issued, limit = self.quota.limit(), "Quota reached, request refused");
            return Err(err);
        }

        let document = request.raw_document.trim();
        let classification = classify(document);
        if !classification.valid {
            debug!(kind = ?classification.kind, "Identity document rejected");
            return Err(AllocationError::InvalidDocument {
                kind: classification.kind,
            });
        }

        let assignment = Assignment {
            identity: document.to_string(),
            requester: request.requester.clone(),
            device_class: request.device_class,
            display_name: request.display_name.clone(),
        };

        let record = self
            .store
            .commit_within_quota(request.pool_id, &assignment, self.quota.limit())
            .map_err(|err| {
                warn!(error = %err, "Commit failed");
                AllocationError::from(err)
            })?;

        info!(
            network = %record.network_name,
            device = %request.device_class,
            document_kind = ?classification.kind,
            remaining = self.quota.remaining(issued + 1),
            "Credential delivered"
        );

        Ok(DeliveredCredential {
            pool_id: record.pool_id,
            network_name: record.network_name.clone(),
            secret: record.secret().to_string(),
            device_class: request.device_class,
        })
    }

    #[instrument(skip_all, fields(requester = %requester))]
    fn issued_credentials(
        &self,
        requester: &RequesterRef,
    ) -> Result<Vec<IssuedCredential>, AllocationError> {
        let records = self.store.issued_to(requester)?;
        debug!(count = records.len(), "Listed issued credentials");
        Ok(records.iter().map(IssuedCredential::from).collect())
    }
}
