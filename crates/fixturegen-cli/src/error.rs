//! CLI error types

use thiserror::Error;

use fixturegen_types::FixtureError;

/// CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Fixture error: {0}")]
    Fixture(#[from] FixtureError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{failed} of {total} fixture passes failed")]
    Generation { failed: usize, total: usize },
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
