use authscan_core::{normalize_serial, SeedRow, SerialRecord};
use rusqlite::{params, OptionalExtension as _, TransactionBehavior};

use super::{get_conn, Storage};
use crate::error::StorageError;

fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<SerialRecord> {
    Ok(SerialRecord {
        id: row.get(0)?,
        serial_number: row.get(1)?,
        used: row.get::<_, i64>(2)? != 0,
    })
}

fn to_count(n: i64) -> u64 {
    u64::try_from(n).unwrap_or_default()
}

impl Storage {
    /// Number of records.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn count(&self) -> Result<u64, StorageError> {
        let conn = get_conn(&self.pool)?;
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM serials", [], |row| row.get(0))?;
        Ok(to_count(n))
    }

    /// Number of consumed records.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn count_used(&self) -> Result<u64, StorageError> {
        let conn = get_conn(&self.pool)?;
        let n: i64 =
            conn.query_row("SELECT COUNT(*) FROM serials WHERE used != 0", [], |row| row.get(0))?;
        Ok(to_count(n))
    }

    /// Look up a record by serial. The argument is normalized first.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn find_by_serial(&self, serial: &str) -> Result<Option<SerialRecord>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let record = conn
            .query_row(
                "SELECT id, serial_number, used FROM serials WHERE serial_number = ?1",
                params![normalize_serial(serial)],
                row_to_record,
            )
            .optional()?;
        Ok(record)
    }

    /// Conditionally flip `used` to 1 inside an immediate transaction.
    ///
    /// # Errors
    /// Returns error if the update or commit fails; the transaction is rolled back on drop.
    pub fn mark_used(&self, record: &SerialRecord) -> Result<bool, StorageError> {
        let mut conn = get_conn(&self.pool)?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let changed =
            tx.execute("UPDATE serials SET used = 1 WHERE id = ?1 AND used = 0", params![record.id])?;
        tx.commit()?;
        Ok(changed == 1)
    }

    /// Insert seed rows in one transaction, ignoring serials already present.
    ///
    /// # Errors
    /// Returns error if any insert or the commit fails; nothing is inserted in that case.
    pub fn insert_batch(&self, rows: &[SeedRow]) -> Result<usize, StorageError> {
        let mut conn = get_conn(&self.pool)?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let mut inserted = 0usize;
        {
            let mut stmt = tx.prepare(
                "INSERT OR IGNORE INTO serials (serial_number, used) VALUES (?1, ?2)",
            )?;
            for row in rows {
                let changed =
                    stmt.execute(params![normalize_serial(&row.serial_number), i64::from(row.used)])?;
                inserted = inserted.saturating_add(changed);
            }
        }
        tx.commit()?;
        Ok(inserted)
    }
}
