//! Export module for the finance tracker
//!
//! Provides data export in two formats:
//! - JSON: self-contained snapshot with summary and all records
//! - CSV: records only (spreadsheet-compatible)

pub mod csv;
pub mod json;

pub use csv::{export_records_csv, export_records_csv_file};
pub use json::{export_snapshot, read_export, ExportDocument};
