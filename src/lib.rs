//! Cross-contract consistency validation for homelab network configuration
//!
//! Checks the VLAN, IPAM, DNS, access-matrix and platform contracts against
//! each other and reports ordered errors and warnings. Nothing is corrected.

pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod errors;
pub mod loader;
pub mod report;
pub mod validation;

// Re-export commonly used types
pub use config::{ReportFormat, ValidatorConfig};
pub use diagnostics::{Diagnostics, Severity};
pub use errors::{ContractError, ContractResult};
pub use loader::{ContractDocuments, ContractKind, ContractLoader};
pub use report::Report;
pub use validation::{ContractValidator, ValidationOutcome};
