// Copyright (c) 2025 - Cowboy AI, Inc.
//! Contract Validation Pipeline
//!
//! Stages run in a fixed order, each feeding the next:
//!
//! ```text
//! loader → vlans → ipam → dns
//!                ↘ access matrix
//!          platform (independent)
//! ```
//!
//! Every stage appends to the same [`Diagnostics`], so the report order is
//! the stage order. No stage aborts the run.

pub mod access;
pub mod dns;
pub mod ipam;
pub mod platform;
pub mod vlans;

use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};
use tracing::info;

use crate::config::ValidatorConfig;
use crate::diagnostics::{Diagnostics, Severity};
use crate::domain::{AccessRule, DnsZone, NetworkSet, ReservationRecord, VlanSet};
use crate::errors::ContractResult;
use crate::loader::{ContractDocuments, ContractKind, ContractLoader};

pub use access::validate_access_matrix;
pub use dns::validate_dns;
pub use ipam::{validate_ipam, IpamOutcome};
pub use platform::validate_platform;
pub use vlans::validate_vlans;

/// Everything a run produced
#[derive(Debug, Clone, Default)]
pub struct ValidationOutcome {
    pub vlans: VlanSet,
    pub networks: NetworkSet,
    pub reservations: Vec<ReservationRecord>,
    pub zones: Vec<DnsZone>,
    pub access_rules: Vec<AccessRule>,
    pub diagnostics: Diagnostics,
}

impl ValidationOutcome {
    /// True when no errors were recorded
    pub fn is_success(&self) -> bool {
        self.diagnostics.is_success()
    }
}

/// Runs the full pipeline over a contracts directory
#[derive(Debug, Clone)]
pub struct ContractValidator {
    config: ValidatorConfig,
}

impl ContractValidator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Load every contract and validate it
    ///
    /// Fails only when the contracts directory itself is missing; all
    /// per-document problems are diagnostics in the outcome.
    pub fn validate_all(&self) -> ContractResult<ValidationOutcome> {
        let loader = ContractLoader::new(&self.config.contracts_dir);
        loader.ensure_dir()?;

        let mut diagnostics = Diagnostics::new();
        info!("Loading contract files...");
        let documents = loader.load_all(&mut diagnostics);

        Ok(self.validate_documents(&documents, diagnostics))
    }

    /// Validate already-loaded documents, continuing an existing accumulator
    pub fn validate_documents(
        &self,
        documents: &ContractDocuments,
        mut diagnostics: Diagnostics,
    ) -> ValidationOutcome {
        info!("Validating VLANs...");
        let vlans = validate_vlans(&documents.vlans, &mut diagnostics);

        info!("Validating IPAM...");
        let ipam = validate_ipam(&documents.ipam, &vlans, &mut diagnostics);

        info!("Validating DNS zones...");
        let zones = validate_dns(&documents.dns_zones, &ipam.reservations, &mut diagnostics);

        info!("Validating access matrix...");
        let access_rules = validate_access_matrix(&documents.access_matrix, &vlans, &mut diagnostics);

        info!("Validating platform configuration...");
        validate_platform(&documents.platform, &self.config.node_domain, &mut diagnostics);

        info!(
            errors = diagnostics.errors().len(),
            warnings = diagnostics.warnings().len(),
            "validation complete"
        );

        ValidationOutcome {
            vlans,
            networks: ipam.networks,
            reservations: ipam.reservations,
            zones,
            access_rules,
            diagnostics,
        }
    }
}

/// Mapping key rendered for diagnostics
pub(crate) fn entry_name(key: &Value) -> String {
    scalar_string(key).unwrap_or_else(|| format!("{key:?}"))
}

/// Scalar YAML value as text
pub(crate) fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// One field read from a contract entry
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Field<T> {
    /// Key absent or `null`
    Absent,
    /// Key present with a value of the wrong shape
    Invalid(String),
    Present(T),
}

impl<T> Field<T> {
    /// Keep a usable value; an invalid one is recorded and dropped
    pub(crate) fn or_report(
        self,
        context: &str,
        key: &str,
        severity: Severity,
        diagnostics: &mut Diagnostics,
    ) -> Option<T> {
        match self {
            Field::Absent => None,
            Field::Invalid(reason) => {
                diagnostics.push(severity, format!("{context}: Invalid '{key}' field: {reason}"));
                None
            }
            Field::Present(value) => Some(value),
        }
    }
}

/// A field the entry cannot do without; absence and bad shape are errors
pub(crate) fn required<T>(
    field: Field<T>,
    context: &str,
    key: &str,
    diagnostics: &mut Diagnostics,
) -> Option<T> {
    match field {
        Field::Absent => {
            diagnostics.error(format!("{context}: Missing '{key}' field"));
            None
        }
        other => other.or_report(context, key, Severity::Error, diagnostics),
    }
}

/// Decode a single field of an entry
pub(crate) fn field<T: DeserializeOwned>(entry: &Value, key: &str) -> Field<T> {
    match entry.get(key) {
        None | Some(Value::Null) => Field::Absent,
        Some(value) => match serde_yaml::from_value(value.clone()) {
            Ok(decoded) => Field::Present(decoded),
            Err(e) => Field::Invalid(e.to_string()),
        },
    }
}

/// Read a scalar field as text; numbers and booleans are rendered
pub(crate) fn text_field(entry: &Value, key: &str) -> Field<String> {
    match entry.get(key) {
        None | Some(Value::Null) => Field::Absent,
        Some(value) => match scalar_string(value) {
            Some(text) => Field::Present(text),
            None => Field::Invalid("expected a scalar value".to_string()),
        },
    }
}

/// Entries must be mappings; an empty entry reads as one with no fields
pub(crate) fn check_entry_shape(value: &Value, context: &str, diagnostics: &mut Diagnostics) -> bool {
    match value {
        Value::Mapping(_) | Value::Null => true,
        _ => {
            diagnostics.error(format!("{context}: Invalid definition: expected a mapping"));
            false
        }
    }
}

/// Required top-level mapping; `None` after recording why it is unusable
pub(crate) fn expect_mapping<'a>(
    document: &'a Value,
    key: &str,
    kind: ContractKind,
    diagnostics: &mut Diagnostics,
) -> Option<&'a Mapping> {
    match document.get(key) {
        None => {
            diagnostics.error(format!("{kind}: Missing '{key}' key"));
            None
        }
        Some(value) => section_mapping(value, key, kind, diagnostics),
    }
}

/// Optional top-level mapping; absence is not an error
pub(crate) fn optional_mapping<'a>(
    document: &'a Value,
    key: &str,
    kind: ContractKind,
    diagnostics: &mut Diagnostics,
) -> Option<&'a Mapping> {
    document
        .get(key)
        .and_then(|value| section_mapping(value, key, kind, diagnostics))
}

/// Required top-level list
pub(crate) fn expect_sequence<'a>(
    document: &'a Value,
    key: &str,
    kind: ContractKind,
    diagnostics: &mut Diagnostics,
) -> Option<&'a [Value]> {
    match document.get(key) {
        None => {
            diagnostics.error(format!("{kind}: Missing '{key}' key"));
            None
        }
        Some(Value::Sequence(items)) => Some(items.as_slice()),
        Some(Value::Null) => Some(&[]),
        Some(_) => {
            diagnostics.error(format!("{kind}: '{key}' must be a list"));
            None
        }
    }
}

fn section_mapping<'a>(
    value: &'a Value,
    key: &str,
    kind: ContractKind,
    diagnostics: &mut Diagnostics,
) -> Option<&'a Mapping> {
    static EMPTY: std::sync::OnceLock<Mapping> = std::sync::OnceLock::new();
    match value {
        Value::Mapping(mapping) => Some(mapping),
        Value::Null => Some(EMPTY.get_or_init(Mapping::new)),
        _ => {
            diagnostics.error(format!("{kind}: '{key}' must be a mapping"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrong_section_shapes_are_errors() {
        let document: Value = serde_yaml::from_str("vlans: [a, b]\nzones: {a: 1}\n").unwrap();
        let mut diagnostics = Diagnostics::new();

        assert!(expect_mapping(&document, "vlans", ContractKind::Vlans, &mut diagnostics).is_none());
        assert!(expect_sequence(&document, "zones", ContractKind::DnsZones, &mut diagnostics).is_none());
        assert_eq!(
            diagnostics.errors(),
            [
                "vlans.yaml: 'vlans' must be a mapping",
                "dns-zones.yaml: 'zones' must be a list",
            ]
        );
    }

    #[test]
    fn test_null_sections_are_empty() {
        let document: Value = serde_yaml::from_str("vlans:\nzones:\n").unwrap();
        let mut diagnostics = Diagnostics::new();

        let vlans = expect_mapping(&document, "vlans", ContractKind::Vlans, &mut diagnostics);
        let zones = expect_sequence(&document, "zones", ContractKind::DnsZones, &mut diagnostics);
        assert_eq!(vlans.map(Mapping::len), Some(0));
        assert_eq!(zones.map(<[Value]>::len), Some(0));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_field_states() {
        let entry: Value = serde_yaml::from_str("id: 10\ntrust: [a]\nname: ~\n").unwrap();

        assert_eq!(field::<i64>(&entry, "id"), Field::Present(10));
        assert_eq!(field::<i64>(&entry, "name"), Field::Absent);
        assert_eq!(field::<i64>(&entry, "missing"), Field::Absent);
        assert!(matches!(field::<String>(&entry, "trust"), Field::Invalid(_)));
        assert_eq!(text_field(&entry, "id"), Field::Present("10".to_string()));
        assert!(matches!(text_field(&entry, "trust"), Field::Invalid(_)));
    }

    #[test]
    fn test_invalid_field_is_reported_with_severity() {
        let mut diagnostics = Diagnostics::new();
        let value = Field::<String>::Invalid("bad".to_string()).or_report(
            "VLAN 'x'",
            "trust",
            Severity::Warning,
            &mut diagnostics,
        );

        assert_eq!(value, None);
        assert_eq!(diagnostics.warnings(), ["VLAN 'x': Invalid 'trust' field: bad"]);
    }

    #[test]
    fn test_entry_name_renders_scalars() {
        assert_eq!(entry_name(&Value::from("mgmt")), "mgmt");
        assert_eq!(entry_name(&Value::from(10)), "10");
    }

    #[test]
    fn test_pipeline_on_empty_documents_fails_loud() {
        let validator = ContractValidator::new(ValidatorConfig::default());
        let outcome =
            validator.validate_documents(&ContractDocuments::default(), Diagnostics::new());

        assert!(!outcome.is_success());
        assert_eq!(
            outcome.diagnostics.errors(),
            [
                "vlans.yaml: Missing 'vlans' key",
                "ipam.yaml: Missing 'networks' key",
                "dns-zones.yaml: Missing 'zones' key",
                "access-matrix.yaml: Missing 'access_matrix' key",
                "platform.yaml: Missing 'platform' key",
            ]
        );
    }
}
