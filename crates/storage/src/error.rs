//! Typed error enum for the storage layer.
//!
//! Lets callers match on specific failure modes (pool exhaustion, SQL failure,
//! unreadable seed source) instead of downcasting opaque boxes.

use thiserror::Error;

/// Storage-layer error with variants covering every expected failure mode.
#[derive(Debug, Error)]
pub enum StorageError {
    /// SQLite statement or transaction failure.
    #[cfg(feature = "sqlite")]
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// No connection could be checked out of the SQLite pool.
    #[cfg(feature = "sqlite")]
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// PostgreSQL query / connection / timeout failure.
    #[cfg(feature = "postgres")]
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failure.
    #[error("migration error: {0}")]
    Migration(String),

    /// Seed source could not be read or decoded as CSV.
    #[error("seed source error: {0}")]
    Seed(#[from] csv::Error),

    /// Connection string names a backend this build does not include.
    #[error("storage backend not available in this build: {0}")]
    BackendUnavailable(&'static str),

    /// A blocking storage task panicked or was cancelled.
    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl StorageError {
    /// Whether this error is likely transient (worth retrying).
    pub fn is_transient(&self) -> bool {
        match self {
            #[cfg(feature = "sqlite")]
            Self::Sqlite(rusqlite::Error::SqliteFailure(e, _)) => matches!(
                e.code,
                rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
            ),
            #[cfg(feature = "sqlite")]
            Self::Pool(_) => true,
            #[cfg(feature = "postgres")]
            Self::Database(sqlx::Error::PoolTimedOut | sqlx::Error::Io(_)) => true,
            _ => false,
        }
    }
}
