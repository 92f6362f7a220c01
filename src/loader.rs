// Copyright (c) 2025 - Cowboy AI, Inc.
//! Contract Loader
//!
//! Reads the five contract documents from the contracts directory. Every
//! failure becomes a diagnostic and an empty mapping is substituted, so the
//! validation stages always receive a well-typed document.

use serde_yaml::{Mapping, Value};
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::diagnostics::Diagnostics;
use crate::errors::{ContractError, ContractResult};

/// The contract documents, in load order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractKind {
    Vlans,
    Ipam,
    DnsZones,
    AccessMatrix,
    Platform,
}

impl ContractKind {
    pub const ALL: [ContractKind; 5] = [
        ContractKind::Vlans,
        ContractKind::Ipam,
        ContractKind::DnsZones,
        ContractKind::AccessMatrix,
        ContractKind::Platform,
    ];

    /// File name inside the contracts directory
    pub fn file_name(&self) -> &'static str {
        match self {
            ContractKind::Vlans => "vlans.yaml",
            ContractKind::Ipam => "ipam.yaml",
            ContractKind::DnsZones => "dns-zones.yaml",
            ContractKind::AccessMatrix => "access-matrix.yaml",
            ContractKind::Platform => "platform.yaml",
        }
    }
}

impl fmt::Display for ContractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file_name())
    }
}

/// Parsed contract documents
///
/// Each field holds the document root; failed loads hold an empty mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractDocuments {
    pub vlans: Value,
    pub ipam: Value,
    pub dns_zones: Value,
    pub access_matrix: Value,
    pub platform: Value,
}

impl Default for ContractDocuments {
    fn default() -> Self {
        Self {
            vlans: empty_document(),
            ipam: empty_document(),
            dns_zones: empty_document(),
            access_matrix: empty_document(),
            platform: empty_document(),
        }
    }
}

impl ContractDocuments {
    fn slot(&mut self, kind: ContractKind) -> &mut Value {
        match kind {
            ContractKind::Vlans => &mut self.vlans,
            ContractKind::Ipam => &mut self.ipam,
            ContractKind::DnsZones => &mut self.dns_zones,
            ContractKind::AccessMatrix => &mut self.access_matrix,
            ContractKind::Platform => &mut self.platform,
        }
    }
}

/// The substitute for a missing or broken document
pub fn empty_document() -> Value {
    Value::Mapping(Mapping::new())
}

fn parse_document(kind: ContractKind, source: &str) -> ContractResult<Value> {
    let value: Value =
        serde_yaml::from_str(source).map_err(|source| ContractError::InvalidYaml {
            file: kind.file_name().to_string(),
            source,
        })?;

    // An empty file parses to null
    Ok(match value {
        Value::Null => empty_document(),
        other => other,
    })
}

/// Loads contract documents from a directory
#[derive(Debug, Clone)]
pub struct ContractLoader {
    contracts_dir: PathBuf,
}

impl ContractLoader {
    pub fn new(contracts_dir: impl Into<PathBuf>) -> Self {
        Self {
            contracts_dir: contracts_dir.into(),
        }
    }

    /// Fail unless the contracts directory exists
    pub fn ensure_dir(&self) -> ContractResult<()> {
        if self.contracts_dir.is_dir() {
            Ok(())
        } else {
            Err(ContractError::ContractsDirNotFound(self.contracts_dir.clone()))
        }
    }

    /// Read and parse one document
    pub fn read(&self, kind: ContractKind) -> ContractResult<Value> {
        let path = self.contracts_dir.join(kind.file_name());
        let source = fs::read_to_string(&path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                ContractError::MissingFile(kind.file_name().to_string())
            } else {
                ContractError::Io {
                    file: kind.file_name().to_string(),
                    source,
                }
            }
        })?;

        debug!(path = %path.display(), bytes = source.len(), "read contract");
        parse_document(kind, &source)
    }

    /// Load one document, substituting an empty mapping on failure
    pub fn load(&self, kind: ContractKind, diagnostics: &mut Diagnostics) -> Value {
        match self.read(kind) {
            Ok(value) => value,
            Err(err) => {
                warn!(contract = %kind, error = %err, "substituting empty document");
                diagnostics.error(err.to_string());
                empty_document()
            }
        }
    }

    /// Load all five documents in order
    pub fn load_all(&self, diagnostics: &mut Diagnostics) -> ContractDocuments {
        let mut documents = ContractDocuments::default();
        for kind in ContractKind::ALL {
            *documents.slot(kind) = self.load(kind, diagnostics);
        }
        documents
    }
}
