use std::result::Result as StdResult;

use thiserror::Error;

/// Unified error type for the store, catalog, and service layers.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Unknown filter category: {0}")]
    UnknownCategory(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Place lookup failed: {0}")]
    Lookup(String),
}

pub type Result<T> = StdResult<T, FilterError>;

impl From<std::io::Error> for FilterError {
    fn from(err: std::io::Error) -> Self {
        FilterError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for FilterError {
    fn from(err: serde_json::Error) -> Self {
        FilterError::Serialization(err.to_string())
    }
}

/// User-facing CLI error wrapper.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] FilterError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}
