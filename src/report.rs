// Copyright (c) 2025 - Cowboy AI, Inc.
//! Validation Report
//!
//! Renders the accumulated diagnostics either as the banner-delimited text
//! report or as a JSON document.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::config::ReportFormat;
use crate::diagnostics::Diagnostics;
use crate::errors::ContractResult;

const BANNER_WIDTH: usize = 60;

/// Final report of a run
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub contracts_dir: PathBuf,
    pub success: bool,
    pub error_count: usize,
    pub warning_count: usize,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl Report {
    pub fn new(contracts_dir: &Path, diagnostics: &Diagnostics) -> Self {
        Self::at(Utc::now(), contracts_dir, diagnostics)
    }

    /// Report stamped with an explicit time
    pub fn at(generated_at: DateTime<Utc>, contracts_dir: &Path, diagnostics: &Diagnostics) -> Self {
        Self {
            generated_at,
            contracts_dir: contracts_dir.to_path_buf(),
            success: diagnostics.is_success(),
            error_count: diagnostics.errors().len(),
            warning_count: diagnostics.warnings().len(),
            errors: diagnostics.errors().to_vec(),
            warnings: diagnostics.warnings().to_vec(),
        }
    }

    pub fn render(&self, format: ReportFormat) -> ContractResult<String> {
        match format {
            ReportFormat::Text => Ok(self.render_text()),
            ReportFormat::Json => self.render_json(),
        }
    }

    /// Banner-delimited report: errors, then warnings, or a success line
    pub fn render_text(&self) -> String {
        let banner = "=".repeat(BANNER_WIDTH);
        let mut out = String::new();

        let _ = writeln!(out, "\n{banner}");

        if !self.errors.is_empty() {
            let _ = writeln!(out, "[ERROR] Found {} error(s):", self.errors.len());
            for error in &self.errors {
                let _ = writeln!(out, "  - {error}");
            }
        }

        if !self.warnings.is_empty() {
            let _ = writeln!(out, "\n[WARNING] Found {} warning(s):", self.warnings.len());
            for warning in &self.warnings {
                let _ = writeln!(out, "  - {warning}");
            }
        }

        if self.errors.is_empty() && self.warnings.is_empty() {
            let _ = writeln!(out, "[SUCCESS] All contracts are valid!");
        }

        let _ = writeln!(out, "{banner}");
        out
    }

    pub fn render_json(&self) -> ContractResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
