// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for the Validation Stages
//!
//! Documents are generated as YAML values, then fed straight to each stage.

use std::collections::HashSet;

use homelab_contracts::domain::{DefaultPolicy, ReservationRecord, VlanRecord, VlanSet};
use homelab_contracts::validation::{
    validate_access_matrix, validate_dns, validate_ipam, validate_vlans,
};
use homelab_contracts::Diagnostics;
use proptest::prelude::*;
use serde_yaml::{Mapping, Value};

// ============================================================================
// Document Builders
// ============================================================================

fn mapping<I, K>(entries: I) -> Value
where
    I: IntoIterator<Item = (K, Value)>,
    K: Into<Value>,
{
    let mut map = Mapping::new();
    for (key, value) in entries {
        map.insert(key.into(), value);
    }
    Value::Mapping(map)
}

fn vlans_document(ids: &[i64]) -> Value {
    let entries = ids
        .iter()
        .enumerate()
        .map(|(i, id)| (format!("vlan{i}"), mapping([("id", Value::from(*id))])));
    mapping([("vlans", mapping(entries))])
}

fn network(vlan_id: i64, cidr: &str, gateway: &str) -> Value {
    mapping([
        ("vlan_id", Value::from(vlan_id)),
        ("cidr", Value::from(cidr)),
        ("gateway", Value::from(gateway)),
    ])
}

fn single_vlan(id: i64) -> VlanSet {
    let mut vlans = VlanSet::default();
    vlans.push(VlanRecord {
        id,
        name: "lan".to_string(),
        trust: "unknown".to_string(),
        default_policy: DefaultPolicy::Deny,
    });
    vlans
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #[test]
    fn prop_unique_ids_yield_all_records(ids in prop::collection::hash_set(1i64..=4094, 0..24)) {
        let ids: Vec<i64> = ids.into_iter().collect();
        let mut diagnostics = Diagnostics::new();

        let vlans = validate_vlans(&vlans_document(&ids), &mut diagnostics);

        prop_assert!(diagnostics.is_empty(), "{:?}", diagnostics);
        prop_assert_eq!(vlans.len(), ids.len());
    }

    #[test]
    fn prop_one_error_per_duplicate_occurrence(ids in prop::collection::vec(1i64..=8, 1..24)) {
        let mut diagnostics = Diagnostics::new();

        let vlans = validate_vlans(&vlans_document(&ids), &mut diagnostics);

        let distinct: HashSet<i64> = ids.iter().copied().collect();
        prop_assert_eq!(diagnostics.errors().len(), ids.len() - distinct.len());
        prop_assert!(diagnostics.errors().iter().all(|e| e.contains("Duplicate VLAN ID")));
        // Duplicates are detected, not dropped
        prop_assert_eq!(vlans.len(), ids.len());
    }

    #[test]
    fn prop_gateway_outside_cidr_is_retained(
        a in 0u8..=255,
        b in 0u8..=254,
        host in 1u8..=254,
    ) {
        let cidr = format!("10.{a}.{b}.0/24");
        let gateway = format!("10.{a}.{}.{host}", b + 1);
        let document = mapping([("networks", mapping([("net", network(7, &cidr, &gateway))]))]);
        let mut diagnostics = Diagnostics::new();

        let outcome = validate_ipam(&document, &single_vlan(7), &mut diagnostics);

        prop_assert_eq!(diagnostics.errors().len(), 1);
        prop_assert!(diagnostics.errors()[0].contains("not in CIDR"));
        prop_assert!(outcome.networks.contains("net"));
    }

    #[test]
    fn prop_reservation_outside_network_is_error(b in 0u8..=254, host in 1u8..=254) {
        let cidr = format!("10.0.{b}.0/24");
        let gateway = format!("10.0.{b}.1");
        let outside = format!("10.0.{}.{host}", b + 1);
        let document = mapping([
            ("networks", mapping([("net", network(7, &cidr, &gateway))])),
            ("reservations", mapping([
                ("outside", mapping([("ip", Value::from(outside.as_str())), ("vlan", Value::from("net"))])),
                ("dangling", mapping([("ip", Value::from(gateway.as_str())), ("vlan", Value::from("other"))])),
            ])),
        ]);
        let mut diagnostics = Diagnostics::new();

        validate_ipam(&document, &single_vlan(7), &mut diagnostics);

        prop_assert_eq!(diagnostics.errors().len(), 2);
        prop_assert!(diagnostics.errors()[0].contains("not in network CIDR"));
        prop_assert!(diagnostics.errors()[1].contains("not found in networks"));
    }

    #[test]
    fn prop_unreserved_a_records_warn_once_each(hosts in prop::collection::vec(2u8..=254, 0..16)) {
        let records: Vec<Value> = hosts
            .iter()
            .enumerate()
            .map(|(i, host)| mapping([
                ("name", Value::from(format!("host{i}"))),
                ("type", Value::from("A")),
                ("value", Value::from(format!("192.168.1.{host}"))),
            ]))
            .collect();
        let document = mapping([(
            "zones",
            Value::Sequence(vec![mapping([
                ("name", Value::from("home.internal")),
                ("records", Value::Sequence(records)),
            ])]),
        )]);
        let reservations = vec![ReservationRecord {
            name: "gw".to_string(),
            ip: Some("192.168.1.1".to_string()),
            vlan: Some("lan_net".to_string()),
        }];
        let mut diagnostics = Diagnostics::new();

        validate_dns(&document, &reservations, &mut diagnostics);

        prop_assert!(diagnostics.errors().is_empty());
        prop_assert_eq!(diagnostics.warnings().len(), hosts.len());
    }

    #[test]
    fn prop_sentinel_endpoints_never_error(
        from_wildcard in any::<bool>(),
        allow in any::<bool>(),
    ) {
        let (from, to) = if from_wildcard { ("*", "lan") } else { ("lan", "internet") };
        let action = if allow { "allow" } else { "deny" };
        let document = mapping([(
            "access_matrix",
            Value::Sequence(vec![mapping([
                ("from", Value::from(from)),
                ("to", Value::from(to)),
                ("action", Value::from(action)),
            ])]),
        )]);
        let mut diagnostics = Diagnostics::new();

        let rules = validate_access_matrix(&document, &single_vlan(1), &mut diagnostics);

        prop_assert!(diagnostics.is_empty(), "{:?}", diagnostics);
        prop_assert_eq!(rules.len(), 1);
    }
}
