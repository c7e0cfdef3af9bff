//! Process configuration read from the environment.

use std::path::PathBuf;

use crate::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_DB_POOL_SIZE, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_SEED_CSV,
    DEFAULT_TEMPLATES_DIR, INDEX_TEMPLATE,
};
use crate::env_config::{flag_is_set, parse_with_default};
use crate::error::ConfigError;

const DEPRECATED_PG_SCHEME: &str = "postgres://";
const PG_SCHEME: &str = "postgresql://";

/// Rewrite the deprecated `postgres://` prefix to `postgresql://`.
///
/// Only the leading scheme is touched; anything else is returned unchanged.
#[must_use]
pub fn normalize_database_url(url: &str) -> String {
    let url = url.trim();
    match url.strip_prefix(DEPRECATED_PG_SCHEME) {
        Some(rest) => format!("{PG_SCHEME}{rest}"),
        None => url.to_owned(),
    }
}

/// Which registry backend a connection string selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseTarget {
    /// File-backed SQLite database.
    Sqlite(PathBuf),
    /// PostgreSQL connection string (canonical scheme).
    Postgres(String),
}

impl DatabaseTarget {
    /// Parse a connection string after normalizing its scheme.
    ///
    /// Accepts `sqlite:///relative.db`, `sqlite:////abs/path.db`, `sqlite://file.db`
    /// and `postgresql://` / `postgres://` URLs.
    pub fn parse(url: &str) -> Result<Self, ConfigError> {
        let url = normalize_database_url(url);
        if url.starts_with(PG_SCHEME) {
            return Ok(Self::Postgres(url));
        }
        let path = url
            .strip_prefix("sqlite:///")
            .or_else(|| url.strip_prefix("sqlite://"))
            .or_else(|| url.strip_prefix("sqlite:"))
            .ok_or_else(|| ConfigError::UnsupportedScheme(url.clone()))?;
        if path.is_empty() {
            return Err(ConfigError::EmptyPath(url));
        }
        Ok(Self::Sqlite(PathBuf::from(path)))
    }
}

/// Everything the binary needs to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database: DatabaseTarget,
    /// Testing mode: no automatic seed at startup.
    pub testing: bool,
    pub seed_csv: PathBuf,
    pub templates_dir: PathBuf,
    pub host: String,
    pub port: u16,
    pub db_pool_size: u32,
}

impl AppConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned());
        let database = DatabaseTarget::parse(&database_url)?;

        Ok(Self {
            database,
            testing: flag_is_set(lookup("TESTING").as_deref()),
            seed_csv: lookup("AUTHSCAN_SEED_CSV")
                .map_or_else(|| PathBuf::from(DEFAULT_SEED_CSV), PathBuf::from),
            templates_dir: lookup("AUTHSCAN_TEMPLATES_DIR")
                .map_or_else(|| PathBuf::from(DEFAULT_TEMPLATES_DIR), PathBuf::from),
            host: lookup("AUTHSCAN_HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            port: parse_with_default("AUTHSCAN_PORT", lookup("AUTHSCAN_PORT").as_deref(), DEFAULT_PORT),
            db_pool_size: parse_with_default(
                "AUTHSCAN_DB_POOL_SIZE",
                lookup("AUTHSCAN_DB_POOL_SIZE").as_deref(),
                DEFAULT_DB_POOL_SIZE,
            ),
        })
    }

    /// Full path of the scanner page template.
    #[must_use]
    pub fn index_template_path(&self) -> PathBuf {
        self.templates_dir.join(INDEX_TEMPLATE)
    }
}
