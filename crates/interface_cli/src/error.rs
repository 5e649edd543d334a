//! CLI error handling

use std::path::PathBuf;
use thiserror::Error;

use core_kernel::CoreError;
use domain_commission::CommissionError;

/// CLI error types
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Cannot read {}: {source}", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot read standard input: {0}")]
    Stdin(#[source] std::io::Error),

    #[error("Input is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid override: {0}")]
    InvalidOverride(#[from] CoreError),

    #[error(transparent)]
    Commission(#[from] CommissionError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
