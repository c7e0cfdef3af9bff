use thiserror::Error;

/// Errors raised while building configuration from the environment.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unsupported database URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("empty database path in URL: {0}")]
    EmptyPath(String),
}
