//! # Credential Store Service
//!
//! Implements `CredentialStoreApi` over any `PoolMedium`.
//!
//! ## Concurrency
//!
//! ```text
//!  readers ──RwLock::read──→ [snapshot]             (ReadConsistency::Snapshot)
//!
//!  commit ──writer gate──→ reload? → check slot → assign copy → persist → swap snapshot
//!  reload ──writer gate──→ load → swap snapshot      (ReadConsistency::Refresh)
//! ```
//!
//! The medium has no compare-and-swap, so the writer gate is the single
//! serialization point for every load-modify-persist cycle. The slot status
//! is checked inside the gate, never trusted from an earlier read.

use parking_lot::{Mutex, RwLock};
use shared_types::{Assignment, CredentialRecord, PoolId, RequesterRef};
use tracing::{debug, info, warn};

use crate::domain::errors::StoreError;
use crate::domain::pool::CredentialPool;
use crate::domain::value_objects::{PoolStats, ReadConsistency, StoreConfig};
use crate::ports::inbound::CredentialStoreApi;
use crate::ports::outbound::PoolMedium;

/// The Credential Store Service.
pub struct CredentialStoreService<M: PoolMedium> {
    /// Backing medium.
    medium: M,
    /// Service configuration.
    config: StoreConfig,
    /// Last committed (or loaded) pool state.
    snapshot: RwLock<CredentialPool>,
    /// Serializes every load-modify-persist cycle.
    writer: Mutex<()>,
}

impl<M: PoolMedium> CredentialStoreService<M> {
    /// Create a service with an empty snapshot. Call `load` before use
    /// in `Snapshot` mode.
    pub fn new(medium: M, config: StoreConfig) -> Self {
        Self {
            medium,
            config,
            snapshot: RwLock::new(CredentialPool::default()),
            writer: Mutex::new(()),
        }
    }

    /// Create a service and load the pool immediately.
    pub fn open(medium: M, config: StoreConfig) -> Result<Self, StoreError> {
        let service = Self::new(medium, config);
        service.load()?;
        Ok(service)
    }

    /// The backing medium.
    pub fn medium(&self) -> &M {
        &self.medium
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Read from the medium. Caller must hold the writer gate.
    fn fetch(&self) -> Result<CredentialPool, StoreError> {
        let rows = self.medium.load().map_err(|e| {
            warn!(medium = %self.medium.describe(), error = %e, "Failed to load credential pool");
            StoreError::from(e)
        })?;
        Ok(CredentialPool::from_rows(rows))
    }

    /// Run a read-only query under the configured consistency.
    fn read<T>(&self, query: impl FnOnce(&CredentialPool) -> T) -> Result<T, StoreError> {
        match self.config.read_consistency {
            ReadConsistency::Snapshot => Ok(query(&self.snapshot.read())),
            ReadConsistency::Refresh => {
                let _gate = self.writer.lock();
                let pool = self.fetch()?;
                let result = query(&pool);
                *self.snapshot.write() = pool;
                Ok(result)
            }
        }
    }

    /// Load-modify-persist cycle for one slot, optionally capped by the
    /// requester's record count.
    fn commit(
        &self,
        pool_id: PoolId,
        assignment: &Assignment,
        limit: Option<usize>,
    ) -> Result<CredentialRecord, StoreError> {
        let _gate = self.writer.lock();

        let mut pool = match self.config.read_consistency {
            ReadConsistency::Refresh => self.fetch()?,
            ReadConsistency::Snapshot => self.snapshot.read().clone(),
        };

        if let Some(limit) = limit {
            let issued = pool.count_issued_to(&assignment.requester);
            if issued >= limit {
                debug!(
                    %pool_id,
                    requester = %assignment.requester,
                    issued,
                    limit,
                    "Commit refused, quota reached"
                );
                return Err(StoreError::QuotaReached {
                    requester: assignment.requester.to_string(),
                    issued,
                    limit,
                });
            }
        }

        let committed = match pool.assign(pool_id, assignment) {
            Ok(record) => record.clone(),
            Err(err) => {
                debug!(%pool_id, requester = %assignment.requester, error = %err, "Commit rejected");
                return Err(err);
            }
        };

        if let Err(err) = self.medium.persist(&pool.to_rows()) {
            warn!(
                %pool_id,
                medium = %self.medium.describe(),
                error = %err,
                "Failed to persist credential pool, commit discarded"
            );
            return Err(err.into());
        }

        *self.snapshot.write() = pool;

        info!(
            %pool_id,
            requester = %assignment.requester,
            network = %committed.network_name,
            "Credential committed"
        );
        Ok(committed)
    }
}

impl<M: PoolMedium> CredentialStoreApi for CredentialStoreService<M> {
    fn load(&self) -> Result<PoolStats, StoreError> {
        let _gate = self.writer.lock();
        let pool = self.fetch()?;
        let stats = pool.stats();
        *self.snapshot.write() = pool;

        info!(
            medium = %self.medium.describe(),
            total = stats.total,
            unassigned = stats.unassigned,
            delivered = stats.delivered,
            "Credential pool loaded"
        );
        Ok(stats)
    }

    fn find_first_unassigned(&self) -> Result<Option<CredentialRecord>, StoreError> {
        self.read(|pool| pool.first_unassigned().cloned())
    }

    fn count_by_requester(&self, requester: &RequesterRef) -> Result<usize, StoreError> {
        self.read(|pool| pool.count_issued_to(requester))
    }

    fn issued_to(&self, requester: &RequesterRef) -> Result<Vec<CredentialRecord>, StoreError> {
        self.read(|pool| pool.issued_to(requester).into_iter().cloned().collect())
    }

    fn commit_assignment(
        &self,
        pool_id: PoolId,
        assignment: &Assignment,
    ) -> Result<CredentialRecord, StoreError> {
        self.commit(pool_id, assignment, None)
    }

    fn commit_within_quota(
        &self,
        pool_id: PoolId,
        assignment: &Assignment,
        limit: usize,
    ) -> Result<CredentialRecord, StoreError> {
        self.commit(pool_id, assignment, Some(limit))
    }

    fn stats(&self) -> Result<PoolStats, StoreError> {
        self.read(|pool| pool.stats())
    }
}
