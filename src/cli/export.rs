//! CLI commands for data export and the audit log

use std::path::Path;

use clap::ValueEnum;

use crate::audit::AuditLogger;
use crate::error::TrackerResult;
use crate::export::export_records_csv_file;
use crate::storage::RecordStore;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// JSON snapshot with summary
    Json,
    /// CSV, one row per record
    Csv,
}

/// Handle `export <path> [--format]`
pub fn handle_export_command(
    store: &RecordStore,
    output: &Path,
    format: ExportFormat,
) -> TrackerResult<()> {
    match format {
        ExportFormat::Json => {
            store.export_snapshot(output)?;
            println!(
                "Exported {} records with summary to: {}",
                store.len(),
                output.display()
            );
        }
        ExportFormat::Csv => {
            let count = export_records_csv_file(store, output)?;
            println!("Exported {} records to: {}", count, output.display());
        }
    }

    Ok(())
}

/// Handle `audit [--limit]`
pub fn handle_audit_command(logger: &AuditLogger, limit: usize) -> TrackerResult<()> {
    if !logger.exists() {
        println!("No audit entries yet.");
        return Ok(());
    }

    let entries = logger.read_recent(limit)?;
    if entries.is_empty() {
        println!("No audit entries yet.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }
    Ok(())
}
