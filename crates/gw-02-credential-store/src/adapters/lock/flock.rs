//! # File Lock Implementation
//!
//! Uses `fs2` for cross-platform file locking (flock on Unix, LockFile on Windows).

use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use thiserror::Error;

/// Errors from pool locking.
#[derive(Debug, Error)]
pub enum LockError {
    /// Lock file could not be created.
    #[error("Failed to create lock file {path}: {source}")]
    CreateFailed { path: PathBuf, source: io::Error },

    /// The pool is already locked by another process.
    #[error("Pool already in use{} ({})", holder(.pid), .path.display())]
    AlreadyLocked { pid: Option<u32>, path: PathBuf },

    /// Failed to write our PID into the lock file.
    #[error("Failed to write PID to lock file: {0}")]
    WriteFailed(io::Error),
}

fn holder(pid: &Option<u32>) -> String {
    pid.map(|p| format!(" by process {p}")).unwrap_or_default()
}

/// Exclusive lock on a pool file.
///
/// Acquired at runtime startup, released on drop (RAII). The lock lives in a
/// sidecar `<pool file>.lock` so the pool file itself can be replaced by
/// rename on every commit.
///
/// # Example
///
/// ```ignore
/// let lock = PoolLock::acquire(Path::new("/data/pool.json"))?;
/// // Lock is held until `lock` goes out of scope
/// ```
pub struct PoolLock {
    /// The lock file handle (kept open to maintain lock)
    file: File,
    path: PathBuf,
    pid: u32,
}

impl PoolLock {
    /// Take the lock for `pool_path`, failing immediately if another
    /// process holds it.
    pub fn acquire(pool_path: &Path) -> Result<Self, LockError> {
        let lock_path = Self::lock_path_for(pool_path);

        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(&lock_path)
            .map_err(|source| LockError::CreateFailed {
                path: lock_path.clone(),
                source,
            })?;

        if file.try_lock_exclusive().is_err() {
            return Err(LockError::AlreadyLocked {
                pid: Self::read_existing_pid(&lock_path),
                path: lock_path,
            });
        }

        let pid = std::process::id();
        let mut locked_file = file;
        locked_file.set_len(0).map_err(LockError::WriteFailed)?;
        writeln!(locked_file, "{}", pid).map_err(LockError::WriteFailed)?;
        locked_file.sync_all().map_err(LockError::WriteFailed)?;

        tracing::info!(path = %lock_path.display(), pid, "Acquired pool lock");

        Ok(Self {
            file: locked_file,
            path: lock_path,
            pid,
        })
    }

    /// Sidecar lock path: the pool path with `.lock` appended.
    pub fn lock_path_for(pool_path: &Path) -> PathBuf {
        let mut name = OsString::from(pool_path.as_os_str());
        name.push(".lock");
        PathBuf::from(name)
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_existing_pid(path: &Path) -> Option<u32> {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|s| s.trim().parse().ok())
    }
}

impl Drop for PoolLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
        let _ = std::fs::remove_file(&self.path);
    }
}
