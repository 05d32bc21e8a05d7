//! CLI error types

use thiserror::Error;

/// CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] flow_types::FlowError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
