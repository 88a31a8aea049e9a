//! JSON output.
//!
//! Serializes the whole [`ScrapeReport`] (listing URL, timestamp, rows and
//! skipped links) as pretty-printed JSON.

use crate::error::Result;
use crate::models::ScrapeReport;
use crate::utils::ensure_parent_dir;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Write `report` to `path`, replacing any existing file.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_report(report: &ScrapeReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    ensure_parent_dir(path).await?;
    fs::write(path, json).await?;
    info!(rows = report.rows.len(), "Wrote JSON report");
    Ok(())
}
