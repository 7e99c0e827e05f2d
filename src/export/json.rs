//! JSON Export functionality
//!
//! Writes a snapshot document holding the export time, the full summary and
//! every record (most recent first). The document is independent of the
//! backing file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{TrackerError, TrackerResult};
use crate::models::record::now;
use crate::models::{format_timestamp, Record};
use crate::reports::Summary;
use crate::storage::file_io::{read_json_required, write_json_atomic};
use crate::storage::RecordStore;

/// Export document structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportDocument {
    /// When the export was taken (local time)
    pub export_date: String,

    /// Summary over all records
    pub summary: Summary,

    /// All records, most recent first
    pub transactions: Vec<Record>,
}

impl ExportDocument {
    /// Build an export document from the store
    pub fn from_store(store: &RecordStore) -> Self {
        Self {
            export_date: format_timestamp(&now()),
            summary: store.summarize(),
            transactions: store.list_all(),
        }
    }

    /// Check that the stored summary agrees with the stored records
    pub fn validate(&self) -> Result<(), String> {
        let recomputed = Summary::from_records(&self.transactions);
        if recomputed != self.summary {
            return Err(format!(
                "Summary does not match records: expected balance {}, found {}",
                recomputed.balance, self.summary.balance
            ));
        }
        Ok(())
    }
}

/// Write the export document for `store` to `destination`
pub fn export_snapshot(store: &RecordStore, destination: impl AsRef<Path>) -> TrackerResult<()> {
    let document = ExportDocument::from_store(store);
    write_json_atomic(destination, &document)
}

/// Read back and validate an export document
pub fn read_export(path: impl AsRef<Path>) -> TrackerResult<ExportDocument> {
    let document: ExportDocument = read_json_required(path)?;
    document.validate().map_err(TrackerError::Export)?;
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, RecordKind};
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, RecordStore) {
        let temp_dir = TempDir::new().unwrap();
        let mut store = RecordStore::open(temp_dir.path().join("data.json")).unwrap();

        for (units, kind, category, day) in [
            (2000, RecordKind::Income, "salary", 1),
            (45, RecordKind::Expense, "food", 3),
            (60, RecordKind::Expense, "transport", 2),
        ] {
            let ts = NaiveDate::from_ymd_opt(2024, 6, day)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap();
            store
                .add(Record::of_kind(
                    Money::from_cents(units * 100),
                    "entry",
                    category,
                    kind,
                    Some(ts),
                ))
                .unwrap();
        }

        (temp_dir, store)
    }

    #[test]
    fn test_export_document_layout() {
        let (temp_dir, store) = create_test_store();
        let dest = temp_dir.path().join("export.json");

        store.export_snapshot(&dest).unwrap();

        let doc: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&dest).unwrap()).unwrap();
        assert!(doc["export_date"].is_string());
        assert_eq!(doc["summary"]["total_income"], 2000.0);
        assert_eq!(doc["summary"]["total_expenses"], 105.0);
        assert_eq!(doc["summary"]["balance"], 1895.0);
        assert_eq!(doc["summary"]["transaction_count"], 3);
        assert_eq!(doc["summary"]["expense_transactions"], 2);
        assert_eq!(doc["summary"]["expense_by_category"]["transport"], 60.0);

        let records = doc["transactions"].as_array().unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0]["category"], "food");
        assert_eq!(records[2]["category"], "salary");
        assert_eq!(records[0]["transaction_type"], "expense");
    }

    #[test]
    fn test_export_does_not_touch_backing_file() {
        let (temp_dir, store) = create_test_store();
        let backing = temp_dir.path().join("data.json");
        let before = fs::read(&backing).unwrap();

        store.export_snapshot(temp_dir.path().join("out.json")).unwrap();

        assert_eq!(fs::read(&backing).unwrap(), before);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_read_export_round_trip() {
        let (temp_dir, store) = create_test_store();
        let dest = temp_dir.path().join("export.json");
        store.export_snapshot(&dest).unwrap();

        let document = read_export(&dest).unwrap();
        assert_eq!(document.transactions.len(), 3);
        assert_eq!(document.summary, store.summarize());
    }

    #[test]
    fn test_read_export_rejects_tampered_summary() {
        let (temp_dir, store) = create_test_store();
        let dest = temp_dir.path().join("export.json");
        store.export_snapshot(&dest).unwrap();

        let mut doc: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&dest).unwrap()).unwrap();
        doc["summary"]["balance"] = serde_json::json!(1.0);
        fs::write(&dest, doc.to_string()).unwrap();

        assert!(matches!(read_export(&dest), Err(TrackerError::Export(_))));
    }

    #[test]
    fn test_export_to_invalid_path_is_io_failure() {
        let (temp_dir, store) = create_test_store();
        let blocker = temp_dir.path().join("file");
        fs::write(&blocker, "x").unwrap();

        let err = store.export_snapshot(blocker.join("export.json")).unwrap_err();
        assert!(err.is_io());
    }
}
