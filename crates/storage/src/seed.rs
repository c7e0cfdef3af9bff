//! One-time population of an empty registry from a CSV file.
//!
//! The source needs a `serial_number` header and may carry a `used` column
//! (0/1). Individual bad rows are skipped and counted; a missing
//! `serial_number` column skips the whole seed.

use std::io::Read;
use std::path::{Path, PathBuf};

use authscan_core::{normalize_serial, SeedRow, SEED_SERIAL_COLUMN, SEED_USED_COLUMN};

use crate::error::StorageError;
use crate::traits::SerialStore;

/// What a seed attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Rows were written. `skipped` counts rows dropped as malformed.
    Seeded { inserted: usize, skipped: usize },
    /// The registry already held data; nothing was read.
    SkippedNonEmpty,
    /// The source file does not exist.
    NoSource,
    /// The source has no `serial_number` header; nothing was inserted.
    MissingSerialColumn,
}

/// Rows decoded from a seed source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSeed {
    pub rows: Vec<SeedRow>,
    pub skipped: usize,
}

/// Decode a seed CSV. Returns `None` if the header lacks `serial_number`.
///
/// # Errors
/// Returns error on I/O failure or an unreadable header row.
pub fn parse_seed_csv<R: Read>(reader: R) -> Result<Option<ParsedSeed>, StorageError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let Some(serial_idx) = headers.iter().position(|h| h == SEED_SERIAL_COLUMN) else {
        return Ok(None);
    };
    let used_idx = headers.iter().position(|h| h == SEED_USED_COLUMN);

    let mut parsed = ParsedSeed::default();
    for (line, result) in rdr.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                tracing::warn!(line = line + 2, error = %e, "skipping undecodable seed row");
                parsed.skipped += 1;
                continue;
            },
        };

        let serial = record.get(serial_idx).map(normalize_serial).unwrap_or_default();
        if serial.is_empty() {
            tracing::warn!(line = line + 2, "skipping seed row without serial_number");
            parsed.skipped += 1;
            continue;
        }

        let raw_used = used_idx.and_then(|idx| record.get(idx)).map(str::trim).unwrap_or_default();
        let used = if raw_used.is_empty() {
            false
        } else {
            match raw_used.parse::<i64>() {
                Ok(v) => v != 0,
                Err(_) => {
                    tracing::debug!(line = line + 2, value = raw_used, "unparseable used flag, defaulting to 0");
                    false
                },
            }
        };

        parsed.rows.push(SeedRow { serial_number: serial, used });
    }
    Ok(Some(parsed))
}

enum SeedSource {
    Missing,
    NoSerialColumn,
    Rows(ParsedSeed),
}

fn read_seed_file(path: &Path) -> Result<SeedSource, StorageError> {
    if !path.exists() {
        return Ok(SeedSource::Missing);
    }
    let file = std::fs::File::open(path).map_err(csv::Error::from)?;
    Ok(parse_seed_csv(file)?.map_or(SeedSource::NoSerialColumn, SeedSource::Rows))
}

/// Seed `store` from the CSV at `path` if and only if the store is empty.
///
/// # Errors
/// Returns error on I/O, CSV header, or database failure. Rows inserted
/// before a database failure are rolled back with their transaction.
pub async fn seed_from_csv<S>(store: &S, path: &Path) -> Result<SeedOutcome, StorageError>
where
    S: SerialStore + ?Sized,
{
    if !store.is_empty().await? {
        return Ok(SeedOutcome::SkippedNonEmpty);
    }

    let owned: PathBuf = path.to_path_buf();
    let parsed = match tokio::task::spawn_blocking(move || read_seed_file(&owned)).await?? {
        SeedSource::Missing => return Ok(SeedOutcome::NoSource),
        SeedSource::NoSerialColumn => return Ok(SeedOutcome::MissingSerialColumn),
        SeedSource::Rows(parsed) => parsed,
    };

    let inserted = store.insert_batch(&parsed.rows).await?;
    Ok(SeedOutcome::Seeded { inserted, skipped: parsed.skipped })
}
