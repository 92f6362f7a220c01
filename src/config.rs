// Copyright (c) 2025 - Cowboy AI, Inc.
//! Validator configuration

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::errors::{ContractError, ContractResult};

/// Default location of the contract documents, relative to the repository root
pub const DEFAULT_CONTRACTS_DIR: &str = "infra/contracts";

/// Default DNS domain expected on platform node names
pub const DEFAULT_NODE_DOMAIN: &str = "home.internal";

/// How the final report is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// Banner-delimited human readable report
    #[default]
    Text,
    /// Single JSON document
    Json,
}

impl FromStr for ReportFormat {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(ContractError::Configuration(format!(
                "unknown report format '{other}' (expected 'text' or 'json')"
            ))),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Configuration for a validation run
#[derive(Debug, Clone)]
pub struct ValidatorConfig {
    /// Directory holding the five contract documents
    pub contracts_dir: PathBuf,
    /// Domain that `kubernetes.primary_node` is expected to live under
    pub node_domain: String,
    /// Report rendering
    pub format: ReportFormat,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            contracts_dir: PathBuf::from(DEFAULT_CONTRACTS_DIR),
            node_domain: DEFAULT_NODE_DOMAIN.to_string(),
            format: ReportFormat::Text,
        }
    }
}

impl ValidatorConfig {
    /// Configuration rooted at an explicit contracts directory
    pub fn with_contracts_dir(contracts_dir: impl Into<PathBuf>) -> Self {
        Self {
            contracts_dir: contracts_dir.into(),
            ..Self::default()
        }
    }

    /// Load configuration from environment variables
    ///
    /// - `CONTRACTS_DIR`
    /// - `CONTRACTS_REPORT_FORMAT` (`text` or `json`)
    /// - `CONTRACTS_NODE_DOMAIN`
    pub fn from_env() -> ContractResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> ContractResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let contracts_dir = lookup("CONTRACTS_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.contracts_dir);

        let node_domain = match lookup("CONTRACTS_NODE_DOMAIN") {
            Some(domain) => {
                let domain = domain.trim().trim_start_matches('.').to_string();
                if domain.is_empty() {
                    return Err(ContractError::Configuration(
                        "CONTRACTS_NODE_DOMAIN must not be empty".to_string(),
                    ));
                }
                domain
            }
            None => defaults.node_domain,
        };

        let format = match lookup("CONTRACTS_REPORT_FORMAT") {
            Some(format) => format.parse()?,
            None => defaults.format,
        };

        Ok(Self {
            contracts_dir,
            node_domain,
            format,
        })
    }
}
