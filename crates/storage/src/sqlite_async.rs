//! Async trait implementation for SQLite `Storage` via `spawn_blocking`.

use async_trait::async_trait;
use authscan_core::{SeedRow, SerialRecord};

use crate::error::StorageError;
use crate::traits::SerialStore;
use crate::Storage;

/// Helper: run a blocking closure on the tokio blocking pool.
async fn blocking<F, T>(f: F) -> Result<T, StorageError>
where
    F: FnOnce() -> Result<T, StorageError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await?
}

/// Body-generating macro for async-to-blocking delegation.
///
/// Each argument is annotated with a capture kind:
/// - `@ref arg`  : `.clone()` a `&T`, pass as `&arg`
/// - `@str arg`  : `.to_owned()` a `&str`, pass as `&arg`
/// - `@slice arg`: `.to_vec()` a `&[T]`, pass as `&arg`
macro_rules! delegate {
    ($self:ident, $method:ident $(, @$kind:ident $arg:ident)*) => {{
        let s = $self.clone();
        $(delegate!(@capture $kind $arg);)*
        blocking(move || s.$method($(delegate!(@pass $kind $arg)),*)).await
    }};
    (@capture ref $arg:ident) => { let $arg = $arg.clone(); };
    (@capture str $arg:ident) => { let $arg = $arg.to_owned(); };
    (@capture slice $arg:ident) => { let $arg = $arg.to_vec(); };
    (@pass ref $arg:ident) => { &$arg };
    (@pass str $arg:ident) => { &$arg };
    (@pass slice $arg:ident) => { &$arg };
}

#[async_trait]
impl SerialStore for Storage {
    async fn count(&self) -> Result<u64, StorageError> {
        delegate!(self, count)
    }
    async fn count_used(&self) -> Result<u64, StorageError> {
        delegate!(self, count_used)
    }
    async fn find_by_serial(&self, serial: &str) -> Result<Option<SerialRecord>, StorageError> {
        delegate!(self, find_by_serial, @str serial)
    }
    async fn mark_used(&self, record: &SerialRecord) -> Result<bool, StorageError> {
        delegate!(self, mark_used, @ref record)
    }
    async fn insert_batch(&self, rows: &[SeedRow]) -> Result<usize, StorageError> {
        delegate!(self, insert_batch, @slice rows)
    }
}
