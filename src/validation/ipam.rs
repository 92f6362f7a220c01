// Copyright (c) 2025 - Cowboy AI, Inc.
//! IPAM stage: network blocks, gateways and static reservations
//!
//! Networks are checked against the known VLAN ids; reservations are
//! checked against the networks that survived validation.

use serde_yaml::{Mapping, Value};
use std::net::IpAddr;
use tracing::debug;

use super::{
    check_entry_shape, entry_name, expect_mapping, field, optional_mapping, required, text_field,
    Field,
};
use crate::diagnostics::Diagnostics;
use crate::domain::{
    networks_overlap, parse_address, parse_network, NetworkRecord, NetworkSet, ReservationRecord,
    VlanSet,
};
use crate::loader::ContractKind;

/// Result of the IPAM stage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IpamOutcome {
    /// Networks that reached the output mapping
    pub networks: NetworkSet,
    /// Every reservation entry, as declared
    pub reservations: Vec<ReservationRecord>,
}

/// Validate networks and reservations
///
/// Without a `networks` mapping the reservations are still collected for
/// the DNS stage, but not checked against networks.
pub fn validate_ipam(document: &Value, vlans: &VlanSet, diagnostics: &mut Diagnostics) -> IpamOutcome {
    let mut outcome = IpamOutcome::default();

    let networks = expect_mapping(document, "networks", ContractKind::Ipam, diagnostics);
    if let Some(entries) = networks {
        for (key, value) in entries {
            let name = entry_name(key);
            if let Some(network) = validate_network(&name, value, vlans, diagnostics) {
                outcome.networks.push(network);
            }
        }
        report_overlaps(&outcome.networks, diagnostics);
    }

    if let Some(entries) = optional_mapping(document, "reservations", ContractKind::Ipam, diagnostics) {
        outcome.reservations = if networks.is_some() {
            check_reservations(entries, &outcome.networks, diagnostics)
        } else {
            entries.iter().map(|(key, value)| raw_reservation(entry_name(key), value)).collect()
        };
    }

    debug!(
        networks = outcome.networks.len(),
        reservations = outcome.reservations.len(),
        "ipam validated"
    );
    outcome
}

fn raw_reservation(name: String, value: &Value) -> ReservationRecord {
    let text = |key: &str| match text_field(value, key) {
        Field::Present(text) => Some(text),
        _ => None,
    };
    ReservationRecord {
        ip: text("ip"),
        vlan: text("vlan"),
        name,
    }
}

fn check_reservations(
    entries: &Mapping,
    networks: &NetworkSet,
    diagnostics: &mut Diagnostics,
) -> Vec<ReservationRecord> {
    let mut reservations = Vec::new();
    let mut reserved: Vec<(String, IpAddr)> = Vec::new();

    for (key, value) in entries {
        let name = entry_name(key);
        if !check_entry_shape(value, &format!("Reservation '{name}'"), diagnostics) {
            continue;
        }

        if let Some(ip) = validate_reservation(&name, value, networks, diagnostics) {
            if let Some((holder, _)) = reserved.iter().find(|(_, other)| *other == ip) {
                diagnostics.warning(format!(
                    "Reservation '{name}': IP {ip} already reserved by '{holder}'"
                ));
            }
            reserved.push((name.clone(), ip));
        }

        reservations.push(raw_reservation(name, value));
    }

    reservations
}

/// Check one network entry; `None` means it is excluded from the output
fn validate_network(
    name: &str,
    value: &Value,
    vlans: &VlanSet,
    diagnostics: &mut Diagnostics,
) -> Option<NetworkRecord> {
    let context = format!("Network '{name}'");
    if !check_entry_shape(value, &context, diagnostics) {
        return None;
    }

    let vlan_id = required(field::<i64>(value, "vlan_id"), &context, "vlan_id", diagnostics)?;

    let vlan_name = vlans.name_for_id(vlan_id).map(str::to_string);
    if vlan_name.is_none() {
        diagnostics.error(format!(
            "{context}: VLAN ID {vlan_id} not defined in vlans.yaml"
        ));
    }

    let raw_cidr = required(text_field(value, "cidr"), &context, "cidr", diagnostics)?;

    let cidr = match parse_network(&raw_cidr) {
        Ok(cidr) => cidr,
        Err(e) => {
            diagnostics.error(format!("{context}: Invalid CIDR '{raw_cidr}': {e}"));
            return None;
        }
    };

    let raw_gateway = required(text_field(value, "gateway"), &context, "gateway", diagnostics)?;

    // A malformed gateway excludes the network; one outside the CIDR does not
    let gateway = match parse_address(&raw_gateway) {
        Ok(gateway) => gateway,
        Err(e) => {
            diagnostics.error(format!(
                "{context}: Invalid gateway '{raw_gateway}': {e}"
            ));
            return None;
        }
    };

    if !cidr.contains(&gateway) {
        diagnostics.error(format!(
            "{context}: Gateway {gateway} not in CIDR {cidr}"
        ));
    }

    Some(NetworkRecord {
        name: name.to_string(),
        vlan_id,
        cidr,
        gateway,
        vlan_name,
    })
}

/// Check one reservation; returns its address when it parsed
fn validate_reservation(
    name: &str,
    value: &Value,
    networks: &NetworkSet,
    diagnostics: &mut Diagnostics,
) -> Option<IpAddr> {
    let context = format!("Reservation '{name}'");
    let raw_ip = required(text_field(value, "ip"), &context, "ip", diagnostics)?;
    let vlan_ref = required(text_field(value, "vlan"), &context, "vlan", diagnostics)?;

    let ip = match parse_address(&raw_ip) {
        Ok(ip) => ip,
        Err(e) => {
            diagnostics.error(format!("{context}: Invalid IP '{raw_ip}': {e}"));
            return None;
        }
    };

    let Some(network) = networks.get(&vlan_ref) else {
        diagnostics.error(format!(
            "{context}: VLAN reference '{vlan_ref}' not found in networks"
        ));
        return Some(ip);
    };

    if !network.cidr.contains(&ip) {
        diagnostics.error(format!(
            "Reservation '{name}': IP {ip} not in network CIDR {}",
            network.cidr
        ));
    }

    Some(ip)
}

fn report_overlaps(networks: &NetworkSet, diagnostics: &mut Diagnostics) {
    let records: Vec<&NetworkRecord> = networks.iter().collect();
    for (i, a) in records.iter().enumerate() {
        for b in &records[i + 1..] {
            if networks_overlap(&a.cidr, &b.cidr) {
                diagnostics.warning(format!(
                    "Network '{}': CIDR {} overlaps network '{}' ({})",
                    b.name, b.cidr, a.name, a.cidr
                ));
            }
        }
    }
}
