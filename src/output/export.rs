//! JSON export of a built directory
//!
//! This is the artifact handed to downstream reporting; it is keyed by
//! canonical state name like the directory itself.

use crate::crawler::{BuildReport, SkippedState};
use crate::output::OutputResult;
use crate::state::StateDirectory;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Serialized form of a build report
#[derive(Debug, Serialize)]
pub struct DirectoryExport<'a> {
    pub generated_at: DateTime<Utc>,
    pub count: usize,
    pub states: &'a StateDirectory,
    pub skipped: &'a [SkippedState],
}

impl<'a> DirectoryExport<'a> {
    /// Snapshots a report with the current time
    pub fn new(report: &'a BuildReport) -> Self {
        Self {
            generated_at: Utc::now(),
            count: report.directory.len(),
            states: &report.directory,
            skipped: &report.skipped,
        }
    }
}

/// Renders a report as pretty-printed JSON
pub fn render_directory_json(report: &BuildReport) -> OutputResult<String> {
    Ok(serde_json::to_string_pretty(&DirectoryExport::new(report))?)
}

/// Writes a report as JSON to `path`, creating parent directories
pub fn export_directory(report: &BuildReport, path: &Path) -> OutputResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(path, render_directory_json(report)?)?;
    tracing::info!(
        "Exported {} states to {}",
        report.directory.len(),
        path.display()
    );
    Ok(())
}
