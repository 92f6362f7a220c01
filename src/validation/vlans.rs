// Copyright (c) 2025 - Cowboy AI, Inc.
//! VLAN stage: normalizes `vlans.yaml` and enforces unique VLAN IDs

use serde_yaml::Value;
use tracing::debug;

use super::{check_entry_shape, entry_name, expect_mapping, field, text_field, Field};
use crate::diagnostics::{Diagnostics, Severity};
use crate::domain::{DefaultPolicy, VlanId, VlanRecord, VlanSet};
use crate::loader::ContractKind;

/// Normalize VLAN definitions
///
/// Entries without a usable `id` are reported and dropped. Duplicate ids are
/// reported once per duplicating entry, and that entry is still kept. A
/// malformed `trust` or `default_policy` is reported and replaced by its
/// default.
pub fn validate_vlans(document: &Value, diagnostics: &mut Diagnostics) -> VlanSet {
    let mut vlans = VlanSet::default();

    let Some(entries) = expect_mapping(document, "vlans", ContractKind::Vlans, diagnostics) else {
        return vlans;
    };

    for (key, value) in entries {
        let name = entry_name(key);
        let context = format!("VLAN '{name}'");
        if !check_entry_shape(value, &context, diagnostics) {
            continue;
        }

        let id = match field::<i64>(value, "id") {
            Field::Present(id) => id,
            Field::Absent => {
                diagnostics.error(format!("{context}: Missing 'id' field"));
                continue;
            }
            Field::Invalid(reason) => {
                diagnostics.error(format!("{context}: Invalid 'id' field: {reason}"));
                continue;
            }
        };

        if vlans.contains_id(id) {
            diagnostics.error(format!("{context}: Duplicate VLAN ID {id}"));
        }

        if let Err(e) = VlanId::new(id) {
            diagnostics.warning(format!("{context}: {e}"));
        }

        let trust = text_field(value, "trust")
            .or_report(&context, "trust", Severity::Error, diagnostics)
            .unwrap_or_else(|| "unknown".to_string());

        let default_policy = match text_field(value, "default_policy")
            .or_report(&context, "default_policy", Severity::Error, diagnostics)
        {
            None => DefaultPolicy::default(),
            Some(policy) => policy.parse::<DefaultPolicy>().unwrap_or_else(|invalid: String| {
                diagnostics.error(format!(
                    "{context}: Invalid default_policy '{invalid}' (must be 'allow' or 'deny')"
                ));
                DefaultPolicy::default()
            }),
        };

        vlans.push(VlanRecord {
            id,
            name,
            trust,
            default_policy,
        });
    }

    debug!(count = vlans.len(), "vlans normalized");
    vlans
}
