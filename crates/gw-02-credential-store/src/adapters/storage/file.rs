use crate::domain::errors::MediumError;
use crate::domain::row::PoolRow;
use crate::ports::outbound::PoolMedium;
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Pool stored as a JSON array of rows.
///
/// Every `persist` rewrites the whole file through a temp file and a rename,
/// so a concurrent reader sees either the old or the new pool, never a mix.
pub struct JsonFilePoolMedium {
    path: PathBuf,
}

impl JsonFilePoolMedium {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sidecar temp path: the pool path with `.tmp` appended, so it never
    /// collides with the pool file whatever its extension.
    pub fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }

    /// Write `bytes` to `temp_path` and move it over the pool file.
    fn replace_with(&self, temp_path: &Path, bytes: &[u8]) -> std::io::Result<()> {
        let mut file = std::fs::File::create(temp_path)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        drop(file);
        std::fs::rename(temp_path, &self.path)
    }

    fn io_error(err: std::io::Error) -> MediumError {
        MediumError::Io {
            message: err.to_string(),
        }
    }
}

impl PoolMedium for JsonFilePoolMedium {
    fn load(&self) -> Result<Vec<PoolRow>, MediumError> {
        let bytes = std::fs::read(&self.path).map_err(|e| MediumError::Io {
            message: format!("{}: {}", self.path.display(), e),
        })?;

        let rows: Vec<PoolRow> =
            serde_json::from_slice(&bytes).map_err(|e| MediumError::Corrupt {
                message: format!("{}: {}", self.path.display(), e),
            })?;

        tracing::debug!(path = %self.path.display(), rows = rows.len(), "Loaded pool file");
        Ok(rows)
    }

    fn persist(&self, rows: &[PoolRow]) -> Result<(), MediumError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(Self::io_error)?;
            }
        }

        let bytes = serde_json::to_vec_pretty(rows).map_err(|e| MediumError::Corrupt {
            message: e.to_string(),
        })?;

        // Write atomically via temp file
        let temp_path = self.temp_path();
        if let Err(err) = self.replace_with(&temp_path, &bytes) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(Self::io_error(err));
        }

        tracing::debug!(path = %self.path.display(), rows = rows.len(), "Persisted pool file");
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
