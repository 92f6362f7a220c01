// Copyright (c) 2025 - Cowboy AI, Inc.
//! Contract Domain Models
//!
//! Value objects and normalized records shared by the validation stages.
//!
//! # Value Objects with Invariants
//!
//! - [`Hostname`] - DNS-validated hostnames (RFC 1123)
//! - [`VlanId`] - IEEE 802.1Q VLAN ID (1-4094)
//! - [`PortSpec`] - access rule port or port range
//!
//! # Records
//!
//! - [`VlanRecord`], [`NetworkRecord`], [`ReservationRecord`]
//! - [`DnsZone`], [`DnsRecord`]
//! - [`AccessRule`]

pub mod hostname;
pub mod network;
pub mod records;

pub use hostname::{Hostname, HostnameError};
pub use network::{networks_overlap, parse_address, parse_network, NetworkError, PortSpec, VlanId};
pub use records::{
    AccessRule, Action, DefaultPolicy, DnsRecord, DnsZone, Endpoint, NetworkRecord, NetworkSet,
    ReservationRecord, VlanRecord, VlanSet,
};
