//! Formatted output helpers for CLI commands.
//!
//! Pure rendering of a [`MigrationReport`] into the aligned table shown
//! by default or the JSON document behind `--json`.

use numashift_common::error::Result;
use numashift_common::types::{MigrationReport, MigrationStatus};

/// Renders a migration report as an aligned text table.
#[must_use]
pub fn format_table(report: &MigrationReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "container {} at {}\nnodes {} -> {}\n\n",
        report.container_id,
        report.group_path.display(),
        report.from,
        report.to,
    ));
    out.push_str(&format!("{:<10} {:<10} {}\n", "PID", "STATUS", "DETAIL"));
    for outcome in &report.processes {
        let (status, detail) = describe(&outcome.status);
        out.push_str(&format!("{:<10} {status:<10} {detail}\n", outcome.pid));
    }
    out.push_str(&format!(
        "\n{} migrated, {} failed, {} skipped\n",
        report.migrated_count(),
        report.failed_count(),
        report.skipped_count(),
    ));
    out
}

/// Renders a migration report as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if the report cannot be serialized.
pub fn format_json(report: &MigrationReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

fn describe(status: &MigrationStatus) -> (&'static str, String) {
    match status {
        MigrationStatus::Migrated { unmoved_pages: 0 } => ("migrated", String::new()),
        MigrationStatus::Migrated { unmoved_pages } => {
            ("migrated", format!("{unmoved_pages} pages not moved"))
        }
        MigrationStatus::Failed { error } => ("failed", error.clone()),
        MigrationStatus::Skipped => ("skipped", String::new()),
    }
}
