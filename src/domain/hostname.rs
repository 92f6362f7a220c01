// Copyright (c) 2025 - Cowboy AI, Inc.
//! Node Hostname with DNS Validation Invariants
//!
//! Used by the platform checks to vet node names declared for the cluster.

use std::fmt;
use thiserror::Error;

/// Hostname validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostnameError {
    #[error("hostname is empty")]
    Empty,

    #[error("hostname exceeds maximum length of 253 characters ({0})")]
    TooLong(usize),

    #[error("empty label in '{0}'")]
    EmptyLabel(String),

    #[error("label exceeds maximum length of 63 characters: {0}")]
    LabelTooLong(String),

    #[error("invalid character '{0}'")]
    InvalidCharacter(char),

    #[error("label cannot start or end with hyphen: {0}")]
    InvalidLabelFormat(String),

    #[error("top-level label cannot be all numeric: {0}")]
    NumericTld(String),
}

/// RFC 1123 hostname
///
/// Invariants:
/// - Total length ≤ 253 characters (a single trailing root dot is ignored)
/// - Each label 1-63 characters of ASCII alphanumerics and hyphens
/// - Labels cannot start or end with hyphens
/// - The last label of a multi-label name cannot be all numeric
///
/// # Examples
///
/// ```rust
/// use homelab_contracts::domain::Hostname;
///
/// let node = Hostname::new("k8s-01.home.internal").unwrap();
/// assert!(node.is_within("home.internal"));
/// assert!(Hostname::new("-bad").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Hostname(String);

impl Hostname {
    /// Maximum total length for FQDN (RFC 1123)
    pub const MAX_LENGTH: usize = 253;

    /// Maximum length for a single label (RFC 1123)
    pub const MAX_LABEL_LENGTH: usize = 63;

    /// Create a new hostname with validation
    pub fn new(hostname: impl Into<String>) -> Result<Self, HostnameError> {
        let hostname = hostname.into();
        let name = hostname.strip_suffix('.').unwrap_or(&hostname);

        if name.is_empty() {
            return Err(HostnameError::Empty);
        }

        if name.len() > Self::MAX_LENGTH {
            return Err(HostnameError::TooLong(name.len()));
        }

        let labels: Vec<&str> = name.split('.').collect();
        for label in &labels {
            Self::validate_label(label, name)?;
        }

        if labels.len() > 1 {
            if let Some(tld) = labels.last() {
                if tld.chars().all(|c| c.is_ascii_digit()) {
                    return Err(HostnameError::NumericTld(tld.to_string()));
                }
            }
        }

        Ok(Self(name.to_ascii_lowercase()))
    }

    fn validate_label(label: &str, name: &str) -> Result<(), HostnameError> {
        if label.is_empty() {
            return Err(HostnameError::EmptyLabel(name.to_string()));
        }

        if label.len() > Self::MAX_LABEL_LENGTH {
            return Err(HostnameError::LabelTooLong(label.to_string()));
        }

        if let Some(ch) = label
            .chars()
            .find(|ch| !ch.is_ascii_alphanumeric() && *ch != '-')
        {
            return Err(HostnameError::InvalidCharacter(ch));
        }

        if label.starts_with('-') || label.ends_with('-') {
            return Err(HostnameError::InvalidLabelFormat(label.to_string()));
        }

        Ok(())
    }

    /// Hostname in canonical lowercase form
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when this name sits strictly below `domain`
    pub fn is_within(&self, domain: &str) -> bool {
        let domain = domain.trim_matches('.').to_ascii_lowercase();
        self.0
            .strip_suffix(domain.as_str())
            .is_some_and(|head| head.len() > 1 && head.ends_with('.'))
    }
}

impl fmt::Display for Hostname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
