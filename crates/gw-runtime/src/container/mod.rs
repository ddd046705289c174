//! # Service Container
//!
//! Builds the subsystem stack from configuration and owns it for the life
//! of the process:
//!
//! ```text
//! PoolLock (optional) → JsonFilePoolMedium → CredentialStoreService
//!                     → AllocationEngine → ConversationController
//! ```

pub mod config;

pub use config::{ConfigError, LoggingConfig, PoolConfig, RuntimeConfig};

use std::sync::Arc;

use gw_02_credential_store::{
    CredentialStoreApi, CredentialStoreService, JsonFilePoolMedium, LockError, PoolLock,
    StoreConfig, StoreError,
};
use gw_03_allocation::AllocationEngine;
use gw_04_conversation::ConversationController;
use thiserror::Error;
use tracing::info;

/// The production controller stack.
pub type GuestWifiController =
    ConversationController<AllocationEngine<CredentialStoreService<JsonFilePoolMedium>>>;

/// Errors while bringing the services up.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Cannot lock credential pool: {0}")]
    Lock(#[from] LockError),

    #[error("Cannot load credential pool: {0}")]
    Store(#[from] StoreError),
}

/// Owns every service for the life of the process.
pub struct ServiceContainer {
    pub config: RuntimeConfig,
    controller: Arc<GuestWifiController>,
    /// Held until drop; `None` when locking is disabled.
    pool_lock: Option<PoolLock>,
}

impl ServiceContainer {
    /// Validate the configuration, lock and load the pool, and wire the
    /// subsystems.
    pub fn open(config: RuntimeConfig) -> Result<Self, StartupError> {
        config.validate()?;

        let pool_lock = if config.pool.lock {
            let lock = PoolLock::acquire(&config.pool.file)?;
            info!(lock = %lock.path().display(), pid = lock.pid(), "Pool lock acquired");
            Some(lock)
        } else {
            None
        };

        let store = CredentialStoreService::open(
            JsonFilePoolMedium::new(&config.pool.file),
            StoreConfig {
                read_consistency: config.pool.read_consistency,
            },
        )?;
        let stats = store.stats()?;
        info!(
            pool = %config.pool.file.display(),
            consistency = ?config.pool.read_consistency,
            unassigned = stats.unassigned,
            quota = config.allocation.quota_limit,
            "Credential services ready"
        );

        let engine = AllocationEngine::new(store, config.allocation);
        Ok(Self {
            config,
            controller: Arc::new(ConversationController::new(engine)),
            pool_lock,
        })
    }

    /// Shared handle on the conversation controller.
    pub fn controller(&self) -> Arc<GuestWifiController> {
        Arc::clone(&self.controller)
    }

    pub fn holds_pool_lock(&self) -> bool {
        self.pool_lock.is_some()
    }
}
