// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for homelab-contracts
//!
//! A consistent baseline contract set plus a temporary contracts directory
//! that tests populate document by document.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use homelab_contracts::{ContractKind, ContractValidator, ValidationOutcome, ValidatorConfig};
use tempfile::TempDir;

pub const VLANS: &str = r#"
vlans:
  mgmt:
    id: 10
    trust: high
  servers:
    id: 20
    trust: medium
  iot:
    id: 30
    trust: low
    default_policy: deny
"#;

pub const IPAM: &str = r#"
networks:
  mgmt_net:
    vlan_id: 10
    cidr: 10.0.10.0/24
    gateway: 10.0.10.1
  servers_net:
    vlan_id: 20
    cidr: 10.0.20.0/24
    gateway: 10.0.20.1
  iot_net:
    vlan_id: 30
    cidr: 10.0.30.0/24
    gateway: 10.0.30.1
reservations:
  router:
    ip: 10.0.10.1
    vlan: mgmt_net
  k8s-01:
    ip: 10.0.20.10
    vlan: servers_net
"#;

pub const DNS_ZONES: &str = r#"
zones:
  - name: home.internal
    records:
      - { name: router, type: A, value: 10.0.10.1 }
      - { name: k8s-01, type: A, value: 10.0.20.10 }
      - { name: api, type: CNAME, value: k8s-01.home.internal }
"#;

pub const ACCESS_MATRIX: &str = r#"
access_matrix:
  - { from: mgmt, to: "*", action: allow }
  - { from: servers, to: internet, action: allow, ports: [80, 443] }
  - { from: iot, to: mgmt, action: deny }
"#;

pub const PLATFORM: &str = r#"
platform:
  kubernetes:
    primary_node: k8s-01.home.internal
"#;

/// Temporary contracts directory
pub struct ContractDir {
    dir: TempDir,
}

impl ContractDir {
    /// Empty directory, no contract files
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Directory holding the full consistent baseline
    pub fn baseline() -> Self {
        let dir = Self::empty();
        dir.write(ContractKind::Vlans, VLANS);
        dir.write(ContractKind::Ipam, IPAM);
        dir.write(ContractKind::DnsZones, DNS_ZONES);
        dir.write(ContractKind::AccessMatrix, ACCESS_MATRIX);
        dir.write(ContractKind::Platform, PLATFORM);
        dir
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, kind: ContractKind, contents: &str) {
        fs::write(self.dir.path().join(kind.file_name()), contents)
            .expect("Failed to write contract");
    }

    pub fn remove(&self, kind: ContractKind) {
        fs::remove_file(self.dir.path().join(kind.file_name())).expect("Failed to remove contract");
    }

    pub fn validate(&self) -> ValidationOutcome {
        ContractValidator::new(ValidatorConfig::with_contracts_dir(self.path()))
            .validate_all()
            .expect("Contracts directory exists")
    }
}
