// Copyright (c) 2025 - Cowboy AI, Inc.
//! Network Value Objects with Validation Invariants

use ipnet::IpNet;
use serde::Deserialize;
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;
use thiserror::Error;

/// Network validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NetworkError {
    #[error("'{0}' does not appear to be an IPv4 or IPv6 address")]
    InvalidIpAddress(String),

    #[error("'{cidr}' does not appear to be an IPv4 or IPv6 network ({reason})")]
    InvalidCidr { cidr: String, reason: String },

    #[error("VLAN ID {0} outside IEEE 802.1Q range 1-4094")]
    InvalidVlanId(i64),

    #[error("port {0} outside range 1-65535")]
    InvalidPort(i64),

    #[error("port range '{0}' has start greater than end")]
    InvertedPortRange(String),

    #[error("unrecognised port spec '{0}'")]
    InvalidPortSpec(String),
}

/// Parse a single IPv4 or IPv6 address
pub fn parse_address(address: &str) -> Result<IpAddr, NetworkError> {
    IpAddr::from_str(address.trim())
        .map_err(|_| NetworkError::InvalidIpAddress(address.to_string()))
}

/// Parse a network block, clearing host bits
///
/// A bare address without prefix length is accepted as a host network
/// (`/32` or `/128`). Host bits set below the prefix are dropped, so
/// `10.0.10.5/24` yields `10.0.10.0/24`.
pub fn parse_network(cidr: &str) -> Result<IpNet, NetworkError> {
    let trimmed = cidr.trim();

    let network = if trimmed.contains('/') {
        IpNet::from_str(trimmed).map_err(|e| NetworkError::InvalidCidr {
            cidr: cidr.to_string(),
            reason: e.to_string(),
        })?
    } else {
        let address = IpAddr::from_str(trimmed).map_err(|e| NetworkError::InvalidCidr {
            cidr: cidr.to_string(),
            reason: e.to_string(),
        })?;
        IpNet::from(address)
    };

    Ok(network.trunc())
}

/// True when two networks share at least one address
pub fn networks_overlap(a: &IpNet, b: &IpNet) -> bool {
    a.contains(b) || b.contains(a)
}

/// VLAN ID value object
///
/// Represents a VLAN ID (IEEE 802.1Q) with validation.
/// Invariants:
/// - Valid VLAN ID range (1-4094)
/// - VLAN 0 and 4095 are reserved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VlanId(u16);

impl VlanId {
    /// Minimum valid VLAN ID
    pub const MIN: u16 = 1;

    /// Maximum valid VLAN ID
    pub const MAX: u16 = 4094;

    /// Create a new VLAN ID with validation
    pub fn new(id: i64) -> Result<Self, NetworkError> {
        u16::try_from(id)
            .ok()
            .filter(|id| (Self::MIN..=Self::MAX).contains(id))
            .map(Self)
            .ok_or(NetworkError::InvalidVlanId(id))
    }
}

/// Port specification on an access rule
///
/// Either a bare port number or a textual spec: `443`, `8000-8100`,
/// `53/udp`, `tcp/22`, or a service name such as `ssh` or `any`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PortSpec {
    Number(i64),
    Named(String),
}

impl PortSpec {
    /// Lowest valid port
    pub const MIN_PORT: i64 = 1;

    /// Highest valid port
    pub const MAX_PORT: i64 = 65535;

    /// Check numeric bounds and range ordering
    pub fn validate(&self) -> Result<(), NetworkError> {
        match self {
            PortSpec::Number(port) => check_port(*port),
            PortSpec::Named(spec) => validate_port_text(spec),
        }
    }
}

impl fmt::Display for PortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortSpec::Number(port) => write!(f, "{port}"),
            PortSpec::Named(spec) => write!(f, "{spec}"),
        }
    }
}

fn check_port(port: i64) -> Result<(), NetworkError> {
    if (PortSpec::MIN_PORT..=PortSpec::MAX_PORT).contains(&port) {
        Ok(())
    } else {
        Err(NetworkError::InvalidPort(port))
    }
}

fn strip_protocol(spec: &str) -> &str {
    let lower = spec.to_ascii_lowercase();
    for proto in ["tcp", "udp"] {
        if lower.ends_with(&format!("/{proto}")) {
            return &spec[..spec.len() - proto.len() - 1];
        }
        if lower.starts_with(&format!("{proto}/")) {
            return &spec[proto.len() + 1..];
        }
    }
    spec
}

fn parse_port_number(text: &str, spec: &str) -> Result<i64, NetworkError> {
    let port = text
        .trim()
        .parse::<i64>()
        .map_err(|_| NetworkError::InvalidPortSpec(spec.to_string()))?;
    check_port(port)?;
    Ok(port)
}

fn validate_port_text(spec: &str) -> Result<(), NetworkError> {
    let body = strip_protocol(spec.trim());

    if body.is_empty() {
        return Err(NetworkError::InvalidPortSpec(spec.to_string()));
    }

    if body.chars().all(|c| c.is_ascii_digit()) {
        return parse_port_number(body, spec).map(|_| ());
    }

    if let Some((lo, hi)) = body.split_once('-') {
        let numeric = |s: &str| !s.trim().is_empty() && s.trim().chars().all(|c| c.is_ascii_digit());
        if numeric(lo) && numeric(hi) {
            let lo = parse_port_number(lo, spec)?;
            let hi = parse_port_number(hi, spec)?;
            if lo > hi {
                return Err(NetworkError::InvertedPortRange(spec.to_string()));
            }
            return Ok(());
        }
    }

    // Service names: ssh, https, any, node-exporter
    let first_is_alpha = body.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
    if first_is_alpha && body.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
        return Ok(());
    }

    Err(NetworkError::InvalidPortSpec(spec.to_string()))
}
