//! `SQLite` storage implementation.
//!
//! All methods are synchronous; the async [`SerialStore`](crate::SerialStore)
//! impl in `sqlite_async` moves them onto the blocking pool.

mod serials;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;

use authscan_core::{DEFAULT_DB_POOL_SIZE, SQLITE_BUSY_TIMEOUT_MS};

use crate::error::StorageError;
use crate::migrations;

/// Type alias for pooled connection
pub(crate) type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Main storage struct wrapping `SQLite` connection pool
#[derive(Clone, Debug)]
pub struct Storage {
    pub(crate) pool: Pool<SqliteConnectionManager>,
}

/// Get a connection from the pool
pub(crate) fn get_conn(pool: &Pool<SqliteConnectionManager>) -> Result<PooledConn, StorageError> {
    Ok(pool.get()?)
}

/// Concurrency settings applied to every pooled connection.
fn init_connection(conn: &mut Connection) -> Result<(), rusqlite::Error> {
    conn.busy_timeout(Duration::from_millis(u64::from(SQLITE_BUSY_TIMEOUT_MS)))?;
    // journal_mode answers with the resulting mode
    let _mode: String =
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    Ok(())
}

impl Storage {
    /// Open (or create) the database at `db_path` with the default pool size.
    pub fn new(db_path: &Path) -> Result<Self, StorageError> {
        Self::with_pool_size(db_path, DEFAULT_DB_POOL_SIZE)
    }

    /// Open (or create) the database and run schema migrations once.
    pub fn with_pool_size(db_path: &Path, pool_size: u32) -> Result<Self, StorageError> {
        let manager = SqliteConnectionManager::file(db_path).with_init(init_connection);
        let pool = Pool::builder().max_size(pool_size.max(1)).build(manager)?;

        let conn = get_conn(&pool)?;
        migrations::run_migrations(&conn)?;
        drop(conn);

        tracing::info!(
            path = %db_path.display(),
            pool_size,
            "Storage initialized with connection pool"
        );

        Ok(Self { pool })
    }
}
