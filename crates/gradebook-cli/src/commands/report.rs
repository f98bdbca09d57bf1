//! The `gradebook report` command.

use std::path::Path;

use anyhow::{Context, Result};

use gradebook_core::report::RosterReport;

use super::Workspace;

pub fn execute(ws: &Workspace, format: &str, output: &Path) -> Result<()> {
    let mut store = ws.load_store()?;
    store.recompute_record_scores();
    store.recompute_course_statistics();

    let report = RosterReport::from_store(&store, ws.title());

    match format {
        "json" => report.save_json(output)?,
        "html" => gradebook_report::write_html_report(&report, output)?,
        "md" | "markdown" => {
            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create directory {}", parent.display())
                })?;
            }
            std::fs::write(output, report.to_markdown()).with_context(|| {
                format!("failed to write markdown report to {}", output.display())
            })?;
        }
        other => anyhow::bail!("unknown report format: {other} (expected json, html or markdown)"),
    }

    println!("Report written to {}", output.display());
    Ok(())
}
