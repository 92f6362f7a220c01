// Copyright (c) 2025 - Cowboy AI, Inc.
//! Access-matrix stage: rule endpoints, actions and ports

use serde_yaml::Value;
use tracing::debug;

use super::{check_entry_shape, expect_sequence, field, text_field, Field};
use crate::diagnostics::{Diagnostics, Severity};
use crate::domain::{AccessRule, Action, Endpoint, PortSpec, VlanSet};
use crate::loader::ContractKind;

/// Validate access-matrix rules against the known VLANs
///
/// Each field of a rule is checked on its own, so one bad field never hides
/// problems in the others. Port problems are warnings. Rules with usable
/// endpoints and action are returned.
pub fn validate_access_matrix(
    document: &Value,
    vlans: &VlanSet,
    diagnostics: &mut Diagnostics,
) -> Vec<AccessRule> {
    let mut rules = Vec::new();

    let Some(entries) =
        expect_sequence(document, "access_matrix", ContractKind::AccessMatrix, diagnostics)
    else {
        return rules;
    };

    for (index, value) in entries.iter().enumerate() {
        let rule = format!("Access rule #{}", index + 1);
        if !check_entry_shape(value, &rule, diagnostics) {
            continue;
        }

        let from = resolve_endpoint(&rule, "from", text_field(value, "from"), vlans, diagnostics);
        let to = resolve_endpoint(&rule, "to", text_field(value, "to"), vlans, diagnostics);
        let action = resolve_action(&rule, text_field(value, "action"), diagnostics);

        let ports: Vec<PortSpec> = field(value, "ports")
            .or_report(&rule, "ports", Severity::Warning, diagnostics)
            .unwrap_or_default();
        for port in &ports {
            if let Err(e) = port.validate() {
                diagnostics.warning(format!("{rule}: Invalid port '{port}': {e}"));
            }
        }

        if let (Some(from), Some(to), Some(action)) = (from, to, action) {
            rules.push(AccessRule {
                from,
                to,
                action,
                ports,
            });
        }
    }

    debug!(valid_rules = rules.len(), "access matrix validated");
    rules
}

fn resolve_endpoint(
    rule: &str,
    key: &str,
    token: Field<String>,
    vlans: &VlanSet,
    diagnostics: &mut Diagnostics,
) -> Option<Endpoint> {
    let token = match token {
        Field::Absent => {
            diagnostics.error(format!("{rule}: Missing '{key}' field"));
            return None;
        }
        other => other.or_report(rule, key, Severity::Error, diagnostics)?,
    };

    let endpoint = Endpoint::resolve(&token, vlans);
    if endpoint.is_none() {
        diagnostics.error(format!("{rule}: Invalid '{key}' VLAN '{token}'"));
    }
    endpoint
}

fn resolve_action(rule: &str, action: Field<String>, diagnostics: &mut Diagnostics) -> Option<Action> {
    let action = match action {
        Field::Absent => {
            diagnostics.error(format!("{rule}: Missing 'action' field"));
            return None;
        }
        other => other.or_report(rule, "action", Severity::Error, diagnostics)?,
    };

    match action.parse::<Action>() {
        Ok(action) => Some(action),
        Err(invalid) => {
            diagnostics.error(format!(
                "{rule}: Invalid action '{invalid}' (must be 'allow' or 'deny')"
            ));
            None
        }
    }
}
