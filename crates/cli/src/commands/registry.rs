use std::path::PathBuf;

use anyhow::Result;
use authscan_core::AppConfig;
use authscan_service::{RegistryService, VerificationService};
use authscan_storage::SeedOutcome;
use serde_json::json;

use crate::open_store;

pub(crate) async fn run_seed(config: AppConfig, csv: Option<PathBuf>) -> Result<()> {
    let store = open_store(&config).await?;
    let path = csv.unwrap_or(config.seed_csv);
    let outcome = RegistryService::new(store).seed_if_empty(&path).await?;

    let report = match outcome {
        SeedOutcome::Seeded { inserted, skipped } => {
            json!({"outcome": "seeded", "inserted": inserted, "skipped": skipped})
        },
        SeedOutcome::SkippedNonEmpty => json!({"outcome": "skipped_non_empty"}),
        SeedOutcome::NoSource => json!({"outcome": "no_source", "path": path.display().to_string()}),
        SeedOutcome::MissingSerialColumn => {
            json!({"outcome": "missing_serial_column", "path": path.display().to_string()})
        },
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

pub(crate) async fn run_verify(config: AppConfig, code: &str) -> Result<()> {
    let store = open_store(&config).await?;
    let outcome = VerificationService::new(store).verify_and_mark(code).await;
    let report = json!({"status": outcome.message(), "valid": outcome.is_valid()});
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

pub(crate) async fn run_stats(config: AppConfig) -> Result<()> {
    let store = open_store(&config).await?;
    let stats = RegistryService::new(store).stats().await?;
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
