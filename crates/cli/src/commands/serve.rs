use std::sync::Arc;

use anyhow::Result;
use authscan_core::AppConfig;
use authscan_http::{create_router, AppState};
use authscan_service::{RegistryService, VerificationService};
use authscan_storage::SerialStore;

use crate::open_store;

/// Store handle plus router state, ready to serve.
pub(crate) struct Startup {
    pub(crate) store: Arc<dyn SerialStore>,
    pub(crate) state: Arc<AppState>,
}

/// Open the store, seed it unless in testing mode, and build the router state.
pub(crate) async fn prepare(config: &AppConfig) -> Result<Startup> {
    let store = open_store(config).await?;

    if config.testing {
        tracing::info!("TESTING is set, skipping automatic seed");
    } else {
        RegistryService::new(Arc::clone(&store)).seed_on_startup(&config.seed_csv).await;
    }

    let template = config.index_template_path();
    if !template.exists() {
        tracing::warn!(
            path = %template.display(),
            "index.html not found, the scanner page will return an error"
        );
    }

    let state = Arc::new(AppState {
        verification_service: Arc::new(VerificationService::new(Arc::clone(&store))),
        templates_dir: config.templates_dir.clone(),
    });
    Ok(Startup { store, state })
}

pub(crate) async fn run(config: AppConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    let Startup { store, state } = prepare(&config).await?;
    match store.count().await {
        Ok(total) => tracing::info!(total, "registry loaded"),
        Err(e) => tracing::warn!(error = %e, "could not count registry records"),
    }

    let router = create_router(state);
    let addr = format!("{}:{}", host.unwrap_or(config.host), port.unwrap_or(config.port));
    tracing::info!("Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use authscan_core::DatabaseTarget;
    use tempfile::TempDir;

    use super::*;

    fn config_in(dir: &TempDir, testing: bool) -> AppConfig {
        let csv = dir.path().join("serials.csv");
        std::fs::write(&csv, "serial_number,used\nIMPORT1,0\nIMPORT2,1\n").unwrap();
        AppConfig {
            database: DatabaseTarget::Sqlite(dir.path().join("serials.db")),
            testing,
            seed_csv: csv,
            templates_dir: dir.path().join("templates"),
            host: "127.0.0.1".to_owned(),
            port: 0,
            db_pool_size: 2,
        }
    }

    #[tokio::test]
    async fn prepare_in_testing_mode_skips_seed() {
        let dir = TempDir::new().unwrap();
        let startup = prepare(&config_in(&dir, true)).await.unwrap();
        assert_eq!(startup.store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn prepare_seeds_empty_store() {
        let dir = TempDir::new().unwrap();
        let startup = prepare(&config_in(&dir, false)).await.unwrap();
        assert_eq!(startup.store.count().await.unwrap(), 2);

        let outcome = startup.state.verification_service.verify_and_mark("import1").await;
        assert!(outcome.is_valid());
        let outcome = startup.state.verification_service.verify_and_mark("IMPORT2").await;
        assert!(outcome.message().contains("already used"));
    }

    #[tokio::test]
    async fn prepare_twice_does_not_reseed() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir, false);
        drop(prepare(&config).await.unwrap());

        std::fs::write(&config.seed_csv, "serial_number\nLATE1\n").unwrap();
        let startup = prepare(&config).await.unwrap();
        assert_eq!(startup.store.count().await.unwrap(), 2);
        assert!(startup.store.find_by_serial("LATE1").await.unwrap().is_none());
    }
}
