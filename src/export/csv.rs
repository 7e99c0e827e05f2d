//! CSV Export functionality
//!
//! Exports records to CSV, most recent first.

use std::io::Write;
use std::path::Path;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{format_timestamp, Record};
use crate::storage::file_io::write_atomic;
use crate::storage::RecordStore;

const HEADER: [&str; 6] = ["ID", "Date", "Type", "Category", "Description", "Amount"];

/// Write the given records as CSV
pub fn export_records_csv<W: Write>(records: &[Record], writer: W) -> TrackerResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(HEADER)?;

    for record in records {
        let date = format_timestamp(&record.timestamp());
        let amount = format!("{}.{:02}", record.amount().dollars(), record.amount().cents_part());
        csv_writer.write_record([
            record.id().as_str(),
            date.as_str(),
            record.kind().as_str(),
            record.category(),
            record.description(),
            amount.as_str(),
        ])?;
    }

    csv_writer
        .flush()
        .map_err(|e| TrackerError::Io(format!("Failed to flush CSV output: {}", e)))
}

/// Export every record in the store to a CSV file
///
/// Returns the number of records written.
pub fn export_records_csv_file(
    store: &RecordStore,
    destination: impl AsRef<Path>,
) -> TrackerResult<usize> {
    let records = store.list_all();
    write_atomic(destination, |writer| export_records_csv(&records, writer))?;
    Ok(records.len())
}
