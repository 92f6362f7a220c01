//! Error types for contract loading and validator setup

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur outside the diagnostic report
///
/// Document-level failures are converted into diagnostics by the loader;
/// only failures that prevent a run from starting escape as errors.
#[derive(Debug, Error)]
pub enum ContractError {
    /// Contract file does not exist
    #[error("Missing contract file: {0}")]
    MissingFile(String),

    /// Contract file could not be parsed as YAML
    #[error("Invalid YAML in {file}: {source}")]
    InvalidYaml {
        file: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// Contract file exists but could not be read
    #[error("Unable to read {file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },

    /// Contracts directory is absent
    #[error("Contracts directory not found: {}", .0.display())]
    ContractsDirNotFound(PathBuf),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Report serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for contract operations
pub type ContractResult<T> = Result<T, ContractError>;

impl From<serde_json::Error> for ContractError {
    fn from(err: serde_json::Error) -> Self {
        ContractError::Serialization(err.to_string())
    }
}
