mod v1;

use rusqlite::Connection;

pub const SCHEMA_VERSION: i32 = 1;

/// Bring the schema up to [`SCHEMA_VERSION`], tracked in `PRAGMA user_version`.
///
/// A database already at or past [`SCHEMA_VERSION`] is left untouched.
pub fn run_migrations(conn: &Connection) -> Result<(), rusqlite::Error> {
    let current_version: i32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    tracing::info!("Database schema version: {} (target: {})", current_version, SCHEMA_VERSION);

    if current_version >= SCHEMA_VERSION {
        return Ok(());
    }

    if current_version < 1i32 {
        tracing::info!("Running migration v1: serials registry");
        conn.execute_batch(v1::SQL)?;
    }

    conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    Ok(())
}
