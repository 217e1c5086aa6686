//! JSON report assembly.
//!
//! Each module's findings are stored as a [`ModuleOutcome`]: completed with
//! its serialized data, or failed with the error string. The report is the
//! only on-disk artifact the tool produces.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Result of running one module.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ModuleOutcome {
    /// The module ran to completion; `data` holds its findings.
    Completed {
        /// Human-readable module title.
        name: &'static str,
        /// Module findings, already serialized.
        data: serde_json::Value,
    },
    /// The module failed; the scan carried on without it.
    Failed {
        /// Human-readable module title.
        name: &'static str,
        /// Error description.
        error: String,
    },
}

/// The full scan report.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Tool name.
    pub tool: &'static str,
    /// Tool version from Cargo.toml.
    pub version: &'static str,
    /// Normalized target URL.
    pub target: String,
    /// Domain extracted from the target.
    pub domain: String,
    /// Scan start time.
    pub started_at: DateTime<Utc>,
    /// Scan end time.
    pub finished_at: DateTime<Utc>,
    /// Wall-clock duration in seconds.
    pub duration_seconds: f64,
    /// Per-module outcomes keyed by module key.
    pub modules: BTreeMap<&'static str, ModuleOutcome>,
}

impl Report {
    /// Number of modules that completed.
    pub fn completed(&self) -> usize {
        self.modules
            .values()
            .filter(|outcome| matches!(outcome, ModuleOutcome::Completed { .. }))
            .count()
    }

    /// Number of modules that failed.
    pub fn failed(&self) -> usize {
        self.modules.len() - self.completed()
    }

    /// Writes the report as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }
}
