//! Store doubles shared by service tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use authscan_core::{SeedRow, SerialRecord};
use authscan_storage::{SerialStore, Storage, StorageError};
use tempfile::TempDir;

pub fn seeded_storage(rows: &[SeedRow]) -> (Storage, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let storage = Storage::new(&temp_dir.path().join("test.db")).unwrap();
    storage.insert_batch(rows).unwrap();
    (storage, temp_dir)
}

/// Store that serves one fixed record and can be told to fail.
#[derive(Default)]
pub struct ScriptedStore {
    pub record: Option<SerialRecord>,
    pub fail_find: bool,
    pub fail_mark: bool,
    pub calls: AtomicUsize,
}

impl ScriptedStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

fn unavailable() -> StorageError {
    StorageError::BackendUnavailable("scripted failure")
}

#[async_trait]
impl SerialStore for ScriptedStore {
    async fn count(&self) -> Result<u64, StorageError> {
        self.hit();
        Ok(u64::from(self.record.is_some()))
    }

    async fn count_used(&self) -> Result<u64, StorageError> {
        self.hit();
        Ok(u64::from(self.record.as_ref().is_some_and(|r| r.used)))
    }

    async fn find_by_serial(&self, serial: &str) -> Result<Option<SerialRecord>, StorageError> {
        self.hit();
        if self.fail_find {
            return Err(unavailable());
        }
        Ok(self.record.clone().filter(|r| r.serial_number == serial))
    }

    async fn mark_used(&self, _record: &SerialRecord) -> Result<bool, StorageError> {
        self.hit();
        if self.fail_mark {
            return Err(unavailable());
        }
        Ok(true)
    }

    async fn insert_batch(&self, _rows: &[SeedRow]) -> Result<usize, StorageError> {
        self.hit();
        Err(unavailable())
    }
}
