//! # Runtime Configuration
//!
//! Defaults suitable for a single-host deployment, overridable from the
//! environment:
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `GW_POOL_FILE` | `pool.file` | `password.json` |
//! | `GW_POOL_LOCK` | `pool.lock` | `true` |
//! | `GW_READ_CONSISTENCY` | `pool.read_consistency` | `refresh` |
//! | `GW_QUOTA_LIMIT` | `allocation.quota_limit` | `2` |
//! | `GW_LOG_LEVEL` | `logging.level` | `info` |
//! | `GW_LOG_JSON` | `logging.json` | `false` |

use std::path::PathBuf;

use gw_02_credential_store::ReadConsistency;
use gw_03_allocation::AllocationConfig;
use thiserror::Error;

/// Complete runtime configuration.
#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    pub pool: PoolConfig,
    pub allocation: AllocationConfig,
    pub logging: LoggingConfig,
}

/// Credential pool configuration.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// JSON pool file.
    pub file: PathBuf,
    /// Take the process lock on the pool file at startup.
    pub lock: bool,
    pub read_consistency: ReadConsistency,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("password.json"),
            lock: true,
            read_consistency: ReadConsistency::Refresh,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An environment variable holds a value of the wrong shape.
    #[error("{var}={value:?} is invalid, expected {expected}")]
    InvalidValue {
        var: &'static str,
        value: String,
        expected: &'static str,
    },

    /// A zero quota would refuse every request.
    #[error("Quota limit must be at least 1")]
    ZeroQuota,

    #[error("Pool file path is empty")]
    EmptyPoolPath,
}

impl RuntimeConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_overrides(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    /// Apply overrides from any variable source.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(file) = lookup("GW_POOL_FILE") {
            self.pool.file = PathBuf::from(file.trim());
        }
        if let Some(value) = lookup("GW_POOL_LOCK") {
            self.pool.lock = parse_flag("GW_POOL_LOCK", &value)?;
        }
        if let Some(value) = lookup("GW_READ_CONSISTENCY") {
            let normalized = value.trim().to_ascii_lowercase();
            self.pool.read_consistency = match normalized.as_str() {
                "refresh" => ReadConsistency::Refresh,
                "snapshot" => ReadConsistency::Snapshot,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        var: "GW_READ_CONSISTENCY",
                        value,
                        expected: "refresh or snapshot",
                    })
                }
            };
        }
        if let Some(value) = lookup("GW_QUOTA_LIMIT") {
            self.allocation.quota_limit =
                value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    var: "GW_QUOTA_LIMIT",
                    value: value.clone(),
                    expected: "a non-negative integer",
                })?;
        }
        if let Some(level) = lookup("GW_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(value) = lookup("GW_LOG_JSON") {
            self.logging.json = parse_flag("GW_LOG_JSON", &value)?;
        }
        Ok(())
    }

    /// Reject configurations the services cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.allocation.quota_limit == 0 {
            return Err(ConfigError::ZeroQuota);
        }
        if self.pool.file.as_os_str().is_empty() {
            return Err(ConfigError::EmptyPoolPath);
        }
        Ok(())
    }
}

fn parse_flag(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var,
            value: value.to_string(),
            expected: "true or false",
        }),
    }
}
