//! Shared constants for authscan.

/// Connection string used when `DATABASE_URL` is unset.
pub const DEFAULT_DATABASE_URL: &str = "sqlite:///serials.db";

/// Seed source read at startup when `AUTHSCAN_SEED_CSV` is unset.
pub const DEFAULT_SEED_CSV: &str = "serials.csv";

/// Directory holding `index.html` when `AUTHSCAN_TEMPLATES_DIR` is unset.
pub const DEFAULT_TEMPLATES_DIR: &str = "templates";

/// File name of the scanner page inside the templates directory.
pub const INDEX_TEMPLATE: &str = "index.html";

pub const DEFAULT_HOST: &str = "127.0.0.1";

pub const DEFAULT_PORT: u16 = 5000;

/// SQLite connection pool: maximum connections.
pub const DEFAULT_DB_POOL_SIZE: u32 = 8;

/// SQLite busy timeout in milliseconds. Concurrent writers wait this long for the lock.
pub const SQLITE_BUSY_TIMEOUT_MS: u32 = 30_000;

/// PostgreSQL connection pool: maximum connections.
pub const PG_POOL_MAX_CONNECTIONS: u32 = 20;

/// PostgreSQL connection pool: acquire timeout in seconds.
pub const PG_POOL_ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// PostgreSQL connection pool: idle timeout in seconds.
pub const PG_POOL_IDLE_TIMEOUT_SECS: u64 = 300;

/// Required column of the seed CSV.
pub const SEED_SERIAL_COLUMN: &str = "serial_number";

/// Optional column of the seed CSV (0/1).
pub const SEED_USED_COLUMN: &str = "used";
