// Copyright (c) 2025 - Cowboy AI, Inc.
//! Diagnostics Accumulator
//!
//! Every validation stage appends to a single [`Diagnostics`] value owned by
//! the run. Insertion order is the report order.

use tracing::debug;

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Contract is inconsistent or malformed; fails the run
    Error,
    /// Contract is valid but suspicious; never fails the run
    Warning,
}

/// Ordered errors and warnings collected across all stages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl Diagnostics {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error
    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Severity::Error, message.into());
    }

    /// Record a warning
    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(Severity::Warning, message.into());
    }

    /// Record a diagnostic with an explicit severity
    pub fn push(&mut self, severity: Severity, message: String) {
        debug!(?severity, %message, "diagnostic recorded");
        match severity {
            Severity::Error => self.errors.push(message),
            Severity::Warning => self.warnings.push(message),
        }
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// True when no errors were recorded; warnings are ignored
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}
