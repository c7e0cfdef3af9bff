use std::path::Path;
use std::sync::Arc;

use authscan_core::RegistryStats;
use authscan_storage::{seed_from_csv, SeedOutcome, SerialStore};

use crate::ServiceError;

/// Registry maintenance: seeding and statistics.
pub struct RegistryService {
    store: Arc<dyn SerialStore>,
}

impl RegistryService {
    #[must_use]
    pub fn new(store: Arc<dyn SerialStore>) -> Self {
        Self { store }
    }

    /// Populate the registry from `csv_path` if it is empty.
    pub async fn seed_if_empty(&self, csv_path: &Path) -> Result<SeedOutcome, ServiceError> {
        Ok(seed_from_csv(self.store.as_ref(), csv_path).await?)
    }

    /// Startup variant of [`Self::seed_if_empty`]: logs the outcome and never fails.
    pub async fn seed_on_startup(&self, csv_path: &Path) -> Option<SeedOutcome> {
        match self.seed_if_empty(csv_path).await {
            Ok(outcome) => {
                log_seed_outcome(outcome, csv_path);
                Some(outcome)
            },
            Err(e) => {
                tracing::error!(path = %csv_path.display(), error = %e, "error seeding database from CSV");
                None
            },
        }
    }

    pub async fn stats(&self) -> Result<RegistryStats, ServiceError> {
        let total = self.store.count().await?;
        let used = self.store.count_used().await?;
        Ok(RegistryStats::new(total, used))
    }
}

fn log_seed_outcome(outcome: SeedOutcome, csv_path: &Path) {
    match outcome {
        SeedOutcome::Seeded { inserted, skipped } => {
            tracing::info!(inserted, skipped, path = %csv_path.display(), "seeded serial registry");
        },
        SeedOutcome::SkippedNonEmpty => {
            tracing::info!("database already contains data, skipping seed");
        },
        SeedOutcome::NoSource => {
            tracing::info!(path = %csv_path.display(), "no seed file found, starting with empty database");
        },
        SeedOutcome::MissingSerialColumn => {
            tracing::warn!(path = %csv_path.display(), "seed CSV missing 'serial_number' column, skipping seed");
        },
    }
}
