//! Storage backend trait abstraction.

use async_trait::async_trait;
use authscan_core::{SeedRow, SerialRecord};

use crate::error::StorageError;

/// Durable, uniquely-indexed registry of serial records.
///
/// Implementations must be safe to share across concurrent requests.
#[async_trait]
pub trait SerialStore: Send + Sync {
    /// Number of records in the registry.
    async fn count(&self) -> Result<u64, StorageError>;

    /// Number of records already consumed.
    async fn count_used(&self) -> Result<u64, StorageError>;

    /// Exact match on the normalized serial.
    async fn find_by_serial(&self, serial: &str) -> Result<Option<SerialRecord>, StorageError>;

    /// Consume `record`.
    ///
    /// Returns `true` only if this call performed the unused → used transition.
    /// A concurrent caller that lost the race gets `false`. On error the
    /// transaction is rolled back and the record stays unused.
    async fn mark_used(&self, record: &SerialRecord) -> Result<bool, StorageError>;

    /// Insert seed rows in a single transaction, skipping serials that already
    /// exist. Returns the number of rows inserted.
    async fn insert_batch(&self, rows: &[SeedRow]) -> Result<usize, StorageError>;

    /// Whether the registry holds no records.
    async fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.count().await? == 0)
    }
}
