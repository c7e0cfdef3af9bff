//! Unified storage backend with enum dispatch.

use async_trait::async_trait;
use authscan_core::{DatabaseTarget, SeedRow, SerialRecord};

use crate::error::StorageError;
use crate::traits::SerialStore;

macro_rules! dispatch {
    ($self:expr, $method:ident ( $($arg:expr),* $(,)? )) => {
        match $self {
            #[cfg(feature = "sqlite")]
            StorageBackend::Sqlite(s) => <crate::Storage as SerialStore>::$method(s, $($arg),*).await,
            #[cfg(feature = "postgres")]
            StorageBackend::Postgres(s) => <crate::PgStorage as SerialStore>::$method(s, $($arg),*).await,
        }
    };
}

#[derive(Clone, Debug)]
pub enum StorageBackend {
    #[cfg(feature = "sqlite")]
    Sqlite(crate::Storage),
    #[cfg(feature = "postgres")]
    Postgres(crate::PgStorage),
}

impl StorageBackend {
    /// Open the backend selected by `target` and run its schema migrations.
    ///
    /// This is the explicit initialization step; nothing touches the schema
    /// before it is called.
    #[cfg_attr(
        not(feature = "sqlite"),
        allow(unused_variables, reason = "pool size only applies to sqlite")
    )]
    pub async fn connect(target: &DatabaseTarget, pool_size: u32) -> Result<Self, StorageError> {
        match target {
            #[cfg(feature = "sqlite")]
            DatabaseTarget::Sqlite(path) => {
                let path = path.clone();
                let storage = tokio::task::spawn_blocking(move || {
                    crate::Storage::with_pool_size(&path, pool_size)
                })
                .await??;
                Ok(Self::Sqlite(storage))
            },
            #[cfg(not(feature = "sqlite"))]
            DatabaseTarget::Sqlite(_) => Err(StorageError::BackendUnavailable("sqlite")),
            #[cfg(feature = "postgres")]
            DatabaseTarget::Postgres(url) => Ok(Self::Postgres(crate::PgStorage::new(url).await?)),
            #[cfg(not(feature = "postgres"))]
            DatabaseTarget::Postgres(_) => Err(StorageError::BackendUnavailable("postgres")),
        }
    }

    /// Short backend name for logs.
    pub const fn kind(&self) -> &'static str {
        match self {
            #[cfg(feature = "sqlite")]
            Self::Sqlite(_) => "sqlite",
            #[cfg(feature = "postgres")]
            Self::Postgres(_) => "postgres",
        }
    }
}

#[async_trait]
impl SerialStore for StorageBackend {
    async fn count(&self) -> Result<u64, StorageError> {
        dispatch!(self, count())
    }

    async fn count_used(&self) -> Result<u64, StorageError> {
        dispatch!(self, count_used())
    }

    async fn find_by_serial(&self, serial: &str) -> Result<Option<SerialRecord>, StorageError> {
        dispatch!(self, find_by_serial(serial))
    }

    async fn mark_used(&self, record: &SerialRecord) -> Result<bool, StorageError> {
        dispatch!(self, mark_used(record))
    }

    async fn insert_batch(&self, rows: &[SeedRow]) -> Result<usize, StorageError> {
        dispatch!(self, insert_batch(rows))
    }
}
