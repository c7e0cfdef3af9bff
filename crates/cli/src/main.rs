use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use authscan_core::{AppConfig, DatabaseTarget};
use authscan_storage::{SerialStore, StorageBackend};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "authscan")]
#[command(about = "Product authenticity verification by one-time serial codes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Port to listen on (overrides AUTHSCAN_PORT)
        #[arg(short, long)]
        port: Option<u16>,
        /// Address to bind (overrides AUTHSCAN_HOST)
        #[arg(short = 'H', long)]
        host: Option<String>,
    },
    /// Seed an empty registry from a CSV file
    Seed {
        /// CSV with a serial_number column (overrides AUTHSCAN_SEED_CSV)
        #[arg(short, long)]
        csv: Option<PathBuf>,
    },
    /// Verify a single code and mark it used on success
    Verify { code: String },
    /// Print registry statistics
    Stats,
}

/// Open the configured registry store, creating the SQLite parent directory if needed.
pub(crate) async fn open_store(config: &AppConfig) -> Result<Arc<dyn SerialStore>> {
    if let DatabaseTarget::Sqlite(path) = &config.database {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating database directory {}", parent.display()))?;
        }
    }
    let backend = StorageBackend::connect(&config.database, config.db_pool_size).await?;
    tracing::info!(backend = backend.kind(), "registry store ready");
    Ok(Arc::new(backend))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;

    match cli.command {
        Commands::Serve { port, host } => commands::serve::run(config, host, port).await,
        Commands::Seed { csv } => commands::registry::run_seed(config, csv).await,
        Commands::Verify { code } => commands::registry::run_verify(config, &code).await,
        Commands::Stats => commands::registry::run_stats(config).await,
    }
}
