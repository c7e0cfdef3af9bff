//! Storage layer for authscan
//!
//! Registry of serial records behind the [`SerialStore`] trait. SQLite is the
//! default backend; PostgreSQL is available with the `postgres` feature.

mod backend;
mod error;
#[cfg(feature = "sqlite")]
mod migrations;
#[cfg(feature = "postgres")]
mod pg_migrations;
#[cfg(feature = "postgres")]
mod pg_storage;
mod seed;
#[cfg(feature = "sqlite")]
mod sqlite_async;
#[cfg(feature = "sqlite")]
mod storage;
#[cfg(all(test, feature = "sqlite"))]
mod tests;
pub mod traits;

pub use backend::StorageBackend;
pub use error::StorageError;
#[cfg(feature = "postgres")]
pub use pg_storage::PgStorage;
pub use seed::{parse_seed_csv, seed_from_csv, ParsedSeed, SeedOutcome};
#[cfg(feature = "sqlite")]
pub use storage::Storage;
pub use traits::SerialStore;
