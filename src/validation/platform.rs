// Copyright (c) 2025 - Cowboy AI, Inc.
//! Platform stage: advisory naming conventions

use serde_yaml::Value;

use super::{check_entry_shape, text_field};
use crate::diagnostics::{Diagnostics, Severity};
use crate::domain::Hostname;
use crate::loader::ContractKind;

const CONTEXT: &str = "Platform";

/// Validate platform metadata
///
/// Only the presence and shape of `platform` are errors; naming checks are warnings.
pub fn validate_platform(document: &Value, node_domain: &str, diagnostics: &mut Diagnostics) {
    let Some(platform) = document.get("platform") else {
        diagnostics.error(format!("{}: Missing 'platform' key", ContractKind::Platform));
        return;
    };

    if !check_entry_shape(platform, &format!("{}: 'platform'", ContractKind::Platform), diagnostics) {
        return;
    }

    let kubernetes = match platform.get("kubernetes") {
        None | Some(Value::Null) => return,
        Some(section @ Value::Mapping(_)) => section,
        Some(_) => {
            diagnostics.warning(format!(
                "{CONTEXT}: Invalid 'kubernetes' field: expected a mapping"
            ));
            return;
        }
    };

    let Some(node) = text_field(kubernetes, "primary_node").or_report(
        &format!("{CONTEXT}: Kubernetes"),
        "primary_node",
        Severity::Warning,
        diagnostics,
    ) else {
        return;
    };

    let in_domain = match Hostname::new(node.as_str()) {
        Ok(hostname) => hostname.is_within(node_domain),
        Err(e) => {
            diagnostics.warning(format!(
                "{CONTEXT}: Kubernetes primary_node '{node}' is not a valid hostname: {e}"
            ));
            node.ends_with(&format!(".{}", node_domain.trim_start_matches('.')))
        }
    };

    if !in_domain {
        diagnostics.warning(format!(
            "{CONTEXT}: Kubernetes primary_node '{node}' doesn't match expected domain pattern"
        ));
    }
}
