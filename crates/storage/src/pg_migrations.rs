//! PostgreSQL schema migrations for authscan storage.

use sqlx::PgPool;

/// Run all PostgreSQL migrations.
pub async fn run_pg_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS serials (
            id BIGSERIAL PRIMARY KEY,
            serial_number VARCHAR(255) NOT NULL UNIQUE,
            used INTEGER NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_serials_serial_number ON serials (serial_number)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
