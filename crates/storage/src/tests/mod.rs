//! Test utilities and module declarations for storage tests.

use crate::Storage;
use authscan_core::SeedRow;
use tempfile::TempDir;

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn create_test_storage() -> (Storage, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let storage = Storage::new(&db_path).unwrap();
    (storage, temp_dir)
}

/// Storage holding `TEST1234` (unused) and `USED1234` (used).
#[expect(clippy::unwrap_used, reason = "test code")]
pub fn create_seeded_storage() -> (Storage, TempDir) {
    let (storage, temp_dir) = create_test_storage();
    storage
        .insert_batch(&[SeedRow::new("TEST1234", false), SeedRow::new("USED1234", true)])
        .unwrap();
    (storage, temp_dir)
}
