//
// report.rs
// LJPEG-Tools-rs
//
// Serializes a finished run (configuration, scan counts, per-file outcomes) to a JSON report.
//
// Thales Matheus Mendonça Santos - October 2026

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::{AllowedExtensions, BatchConfig};
use crate::models::{BatchSummary, ScanResult};

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub directory: PathBuf,
    pub tool: PathBuf,
    pub extensions: AllowedExtensions,
    pub jobs: usize,
    pub recursive: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Set when the directory could not be scanned.
    pub scan_error: Option<String>,
    pub matched: usize,
    pub skipped: usize,
    pub summary: BatchSummary,
}

impl RunReport {
    pub fn new(
        config: &BatchConfig,
        started_at: DateTime<Utc>,
        scan: &ScanResult,
        scan_error: Option<String>,
        summary: &BatchSummary,
    ) -> Self {
        Self {
            directory: config.directory.clone(),
            tool: config.tool.clone(),
            extensions: config.extensions.clone(),
            jobs: config.jobs,
            recursive: config.recursive,
            started_at,
            finished_at: Utc::now(),
            scan_error,
            matched: scan.matches.len(),
            skipped: scan.skipped.len(),
            summary: summary.clone(),
        }
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize run report")
    }
}

/// Write the report as pretty JSON.
pub fn write_report(path: &Path, report: &RunReport) -> Result<()> {
    let json_string = report.to_json_string()?;
    std::fs::write(path, json_string)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    println!("Report saved to {:?}", path);
    Ok(())
}
