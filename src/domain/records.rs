// Copyright (c) 2025 - Cowboy AI, Inc.
//! Validated Contract Records
//!
//! Normalized snapshots built by the validation stages. They live for a
//! single run and are handed from one stage to the next.

use ipnet::IpNet;
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use super::network::PortSpec;

/// Default inter-VLAN policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DefaultPolicy {
    Allow,
    #[default]
    Deny,
}

impl FromStr for DefaultPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "allow" => Ok(Self::Allow),
            "deny" => Ok(Self::Deny),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for DefaultPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allow => write!(f, "allow"),
            Self::Deny => write!(f, "deny"),
        }
    }
}

/// Access rule action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Allow,
    Deny,
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "allow" => Ok(Self::Allow),
            "deny" => Ok(Self::Deny),
            other => Err(other.to_string()),
        }
    }
}

/// A VLAN definition after normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VlanRecord {
    pub id: i64,
    pub name: String,
    pub trust: String,
    pub default_policy: DefaultPolicy,
}

/// Known VLANs in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VlanSet {
    records: Vec<VlanRecord>,
}

impl VlanSet {
    pub fn push(&mut self, record: VlanRecord) {
        self.records.push(record);
    }

    pub fn iter(&self) -> impl Iterator<Item = &VlanRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&VlanRecord> {
        self.records.iter().find(|vlan| vlan.name == name)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn contains_id(&self, id: i64) -> bool {
        self.records.iter().any(|vlan| vlan.id == id)
    }

    /// Name bound to a VLAN id; with duplicated ids the last declaration wins
    pub fn name_for_id(&self, id: i64) -> Option<&str> {
        self.records
            .iter()
            .rev()
            .find(|vlan| vlan.id == id)
            .map(|vlan| vlan.name.as_str())
    }
}

/// A network block bound to a VLAN
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkRecord {
    /// Key under `networks` in ipam.yaml
    pub name: String,
    pub vlan_id: i64,
    /// Canonical form, host bits cleared
    pub cidr: IpNet,
    pub gateway: IpAddr,
    /// `None` when `vlan_id` matches no known VLAN
    pub vlan_name: Option<String>,
}

/// Validated networks in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkSet {
    records: Vec<NetworkRecord>,
}

impl NetworkSet {
    pub fn push(&mut self, record: NetworkRecord) {
        self.records.push(record);
    }

    pub fn iter(&self) -> impl Iterator<Item = &NetworkRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&NetworkRecord> {
        self.records.iter().find(|network| network.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

/// A static reservation as written in ipam.yaml
///
/// Kept raw: DNS cross-checks compare against the declared `ip` whether or
/// not it passed IPAM validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationRecord {
    pub name: String,
    pub ip: Option<String>,
    pub vlan: Option<String>,
}

/// A single DNS record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsRecord {
    pub name: Option<String>,
    pub record_type: Option<String>,
    pub value: Option<String>,
}

impl DnsRecord {
    pub fn is_a_record(&self) -> bool {
        self.record_type.as_deref() == Some("A")
    }

    /// Name used in diagnostics
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }
}

/// A DNS zone and the records registered under it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsZone {
    pub name: String,
    pub records: Vec<DnsRecord>,
}

/// Endpoint of an access rule
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `*`
    Any,
    /// `internet`
    Internet,
    Vlan(String),
}

impl Endpoint {
    pub const WILDCARD: &'static str = "*";
    pub const INTERNET: &'static str = "internet";

    /// Resolve a token against the known VLANs
    pub fn resolve(token: &str, vlans: &VlanSet) -> Option<Self> {
        match token {
            Self::WILDCARD => Some(Self::Any),
            Self::INTERNET => Some(Self::Internet),
            name if vlans.contains_name(name) => Some(Self::Vlan(name.to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => write!(f, "{}", Self::WILDCARD),
            Self::Internet => write!(f, "{}", Self::INTERNET),
            Self::Vlan(name) => write!(f, "{name}"),
        }
    }
}

/// An access-matrix rule that passed every check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRule {
    pub from: Endpoint,
    pub to: Endpoint,
    pub action: Action,
    pub ports: Vec<PortSpec>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vlan(name: &str, id: i64) -> VlanRecord {
        VlanRecord {
            id,
            name: name.to_string(),
            trust: "unknown".to_string(),
            default_policy: DefaultPolicy::default(),
        }
    }

    #[test]
    fn test_default_policy_is_deny() {
        assert_eq!(DefaultPolicy::default(), DefaultPolicy::Deny);
        assert_eq!("allow".parse::<DefaultPolicy>(), Ok(DefaultPolicy::Allow));
        assert!("permit".parse::<DefaultPolicy>().is_err());
    }

    #[test]
    fn test_name_for_duplicate_id_takes_last() {
        let mut vlans = VlanSet::default();
        vlans.push(vlan("mgmt", 10));
        vlans.push(vlan("servers", 10));
        vlans.push(vlan("iot", 30));

        assert_eq!(vlans.name_for_id(10), Some("servers"));
        assert_eq!(vlans.name_for_id(30), Some("iot"));
        assert_eq!(vlans.name_for_id(99), None);
        assert!(vlans.contains_id(10));
    }

    #[test]
    fn test_endpoint_resolution() {
        let mut vlans = VlanSet::default();
        vlans.push(vlan("mgmt", 10));

        assert_eq!(Endpoint::resolve("*", &vlans), Some(Endpoint::Any));
        assert_eq!(Endpoint::resolve("internet", &vlans), Some(Endpoint::Internet));
        assert_eq!(
            Endpoint::resolve("mgmt", &vlans),
            Some(Endpoint::Vlan("mgmt".to_string()))
        );
        assert_eq!(Endpoint::resolve("iot", &vlans), None);
        assert_eq!(Endpoint::Any.to_string(), "*");
    }
}
