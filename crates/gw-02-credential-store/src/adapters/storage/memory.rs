use crate::domain::errors::MediumError;
use crate::domain::row::PoolRow;
use crate::ports::outbound::PoolMedium;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// In-memory pool medium for tests.
///
/// Loads and persists can be made to fail on demand to exercise the
/// `StoreUnavailable` paths.
#[derive(Default)]
pub struct InMemoryPoolMedium {
    rows: Mutex<Vec<PoolRow>>,
    fail_loads: AtomicBool,
    fail_persists: AtomicBool,
    persist_count: AtomicUsize,
}

impl InMemoryPoolMedium {
    pub fn new(rows: Vec<PoolRow>) -> Self {
        Self {
            rows: Mutex::new(rows),
            ..Default::default()
        }
    }

    /// A medium holding `count` unassigned rows named `Guest-<n>` / `pw-<n>`.
    pub fn provisioned(count: usize) -> Self {
        Self::new(
            (0..count)
                .map(|i| PoolRow::provisioned(format!("Guest-{i}"), format!("pw-{i}")))
                .collect(),
        )
    }

    /// Current stored rows.
    pub fn rows(&self) -> Vec<PoolRow> {
        self.rows.lock().clone()
    }

    /// Replace the stored rows, as an out-of-band provisioning step would.
    pub fn replace_rows(&self, rows: Vec<PoolRow>) {
        *self.rows.lock() = rows;
    }

    pub fn set_fail_loads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_persists(&self, fail: bool) {
        self.fail_persists.store(fail, Ordering::SeqCst);
    }

    /// Number of successful persists so far.
    pub fn persist_count(&self) -> usize {
        self.persist_count.load(Ordering::SeqCst)
    }
}

impl PoolMedium for InMemoryPoolMedium {
    fn load(&self) -> Result<Vec<PoolRow>, MediumError> {
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(MediumError::Io {
                message: "injected load failure".to_string(),
            });
        }
        Ok(self.rows.lock().clone())
    }

    fn persist(&self, rows: &[PoolRow]) -> Result<(), MediumError> {
        if self.fail_persists.load(Ordering::SeqCst) {
            return Err(MediumError::Io {
                message: "injected persist failure".to_string(),
            });
        }
        *self.rows.lock() = rows.to_vec();
        self.persist_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
