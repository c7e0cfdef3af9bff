//! Typed error enum for the service layer.

use authscan_storage::StorageError;
use thiserror::Error;

/// Service-layer error.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage operation failed (DB, pool, seed source).
    #[error("storage: {0}")]
    Storage(#[from] StorageError),
}

impl ServiceError {
    /// Whether this error is likely transient (worth retrying).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Storage(e) => e.is_transient(),
        }
    }
}
