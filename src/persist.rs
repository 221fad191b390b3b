use std::path::Path;

use crate::error::Result;
use crate::stats::StatsReport;

/// Default output file, relative to the working directory.
pub const OUTPUT_FILE: &str = "bitbucket-stats.json";

/// Write the full report as pretty-printed JSON, replacing any existing file.
pub fn write_report(path: &Path, report: &StatsReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)?;
    log::info!("Wrote {}", path.display());
    Ok(())
}
