// Copyright (c) 2025 - Cowboy AI, Inc.
//! DNS stage: A-record syntax and cross-check against IPAM reservations

use serde_yaml::Value;
use tracing::debug;

use super::{check_entry_shape, expect_sequence, field, text_field, Field};
use crate::diagnostics::{Diagnostics, Severity};
use crate::domain::{parse_address, DnsRecord, DnsZone, ReservationRecord};
use crate::loader::ContractKind;

/// Validate DNS zones
///
/// A records must carry a parseable address. Addresses without a matching
/// reservation are warnings: dynamic or external hosts are tolerated.
pub fn validate_dns(
    document: &Value,
    reservations: &[ReservationRecord],
    diagnostics: &mut Diagnostics,
) -> Vec<DnsZone> {
    let mut zones: Vec<DnsZone> = Vec::new();

    let Some(entries) = expect_sequence(document, "zones", ContractKind::DnsZones, diagnostics) else {
        return zones;
    };

    for (index, value) in entries.iter().enumerate() {
        let zone_context = format!("Zone #{}", index + 1);
        if !check_entry_shape(value, &zone_context, diagnostics) {
            continue;
        }

        let zone_name = text_field(value, "name")
            .or_report(&zone_context, "name", Severity::Error, diagnostics)
            .unwrap_or_else(|| "unknown".to_string());
        let context = format!("Zone '{zone_name}'");

        let position = match zones.iter().position(|zone| zone.name == zone_name) {
            Some(position) => position,
            None => {
                zones.push(DnsZone {
                    name: zone_name.clone(),
                    records: Vec::new(),
                });
                zones.len() - 1
            }
        };

        let records = match field::<Vec<Value>>(value, "records") {
            Field::Present(records) => records,
            Field::Absent => {
                diagnostics.warning(format!("{context}: No records defined"));
                continue;
            }
            Field::Invalid(reason) => {
                diagnostics.error(format!("{context}: Invalid 'records' field: {reason}"));
                continue;
            }
        };

        for (record_index, raw) in records.iter().enumerate() {
            let record_context = format!("{context}: Record #{}", record_index + 1);
            if !check_entry_shape(raw, &record_context, diagnostics) {
                continue;
            }

            let value = match text_field(raw, "value") {
                Field::Present(value) => Some(value),
                Field::Absent => None,
                Field::Invalid(reason) => {
                    diagnostics.error(format!("{record_context}: Invalid 'value' field: {reason}"));
                    continue;
                }
            };

            let record = DnsRecord {
                name: text_field(raw, "name").or_report(&record_context, "name", Severity::Error, diagnostics),
                record_type: text_field(raw, "type").or_report(&record_context, "type", Severity::Error, diagnostics),
                value,
            };

            if record.is_a_record() && !check_a_record(&zone_name, &record, reservations, diagnostics) {
                continue;
            }

            zones[position].records.push(record);
        }
    }

    debug!(zones = zones.len(), "dns validated");
    zones
}

/// Returns false when the record must be skipped
fn check_a_record(
    zone: &str,
    record: &DnsRecord,
    reservations: &[ReservationRecord],
    diagnostics: &mut Diagnostics,
) -> bool {
    let label = record.label();

    let Some(value) = record.value.as_deref().filter(|v| !v.is_empty()) else {
        diagnostics.error(format!("Zone '{zone}': Record '{label}' missing IP value"));
        return false;
    };

    let address = match parse_address(value) {
        Ok(address) => address,
        Err(e) => {
            diagnostics.error(format!(
                "Zone '{zone}': Record '{label}' has invalid IP '{value}': {e}"
            ));
            return false;
        }
    };

    let reserved = reservations
        .iter()
        .filter_map(|reservation| reservation.ip.as_deref())
        .any(|ip| ip == value || parse_address(ip).is_ok_and(|ip| ip == address));

    if !reserved {
        diagnostics.warning(format!(
            "Zone '{zone}': Record '{label}' IP {value} not found in IPAM reservations"
        ));
    }

    true
}
