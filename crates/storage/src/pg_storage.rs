//! PostgreSQL storage backend using sqlx.

use async_trait::async_trait;
use authscan_core::{
    normalize_serial, SeedRow, SerialRecord, PG_POOL_ACQUIRE_TIMEOUT_SECS,
    PG_POOL_IDLE_TIMEOUT_SECS, PG_POOL_MAX_CONNECTIONS,
};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};

use crate::error::StorageError;
use crate::pg_migrations::run_pg_migrations;
use crate::traits::SerialStore;

#[derive(Clone, Debug)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(PG_POOL_MAX_CONNECTIONS)
            .acquire_timeout(std::time::Duration::from_secs(PG_POOL_ACQUIRE_TIMEOUT_SECS))
            .idle_timeout(std::time::Duration::from_secs(PG_POOL_IDLE_TIMEOUT_SECS))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;
        run_pg_migrations(&pool).await.map_err(|e| StorageError::Migration(e.to_string()))?;
        tracing::info!("PgStorage initialized");
        Ok(Self { pool })
    }
}

fn row_to_record(row: &sqlx::postgres::PgRow) -> Result<SerialRecord, StorageError> {
    Ok(SerialRecord {
        id: row.try_get("id")?,
        serial_number: row.try_get("serial_number")?,
        used: row.try_get::<i32, _>("used")? != 0,
    })
}

fn to_count(n: i64) -> u64 {
    u64::try_from(n).unwrap_or_default()
}

#[async_trait]
impl SerialStore for PgStorage {
    async fn count(&self) -> Result<u64, StorageError> {
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM serials")
            .fetch_one(&self.pool)
            .await?;
        Ok(to_count(n))
    }

    async fn count_used(&self) -> Result<u64, StorageError> {
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM serials WHERE used <> 0")
            .fetch_one(&self.pool)
            .await?;
        Ok(to_count(n))
    }

    async fn find_by_serial(&self, serial: &str) -> Result<Option<SerialRecord>, StorageError> {
        let row = sqlx::query("SELECT id, serial_number, used FROM serials WHERE serial_number = $1")
            .bind(normalize_serial(serial))
            .fetch_optional(&self.pool)
            .await?;
        row.map(|r| row_to_record(&r)).transpose()
    }

    async fn mark_used(&self, record: &SerialRecord) -> Result<bool, StorageError> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query("UPDATE serials SET used = 1 WHERE id = $1 AND used = 0")
            .bind(record.id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() == 1)
    }

    async fn insert_batch(&self, rows: &[SeedRow]) -> Result<usize, StorageError> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0usize;
        for row in rows {
            let result = sqlx::query(
                "INSERT INTO serials (serial_number, used) VALUES ($1, $2)
                 ON CONFLICT (serial_number) DO NOTHING",
            )
            .bind(normalize_serial(&row.serial_number))
            .bind(i32::from(row.used))
            .execute(&mut *tx)
            .await?;
            if result.rows_affected() == 1 {
                inserted = inserted.saturating_add(1);
            }
        }
        tx.commit().await?;
        Ok(inserted)
    }
}
