//! Record store backed by a single JSON file
//!
//! The store exclusively owns the record collection. Every successful
//! mutation (add, delete, clear) rewrites the whole backing file before
//! returning. Memory is mutated first and the file second: if the write
//! fails the error is returned but the in-memory change is kept.
//!
//! Audit entries are written after the file. A failed audit write does not
//! fail the mutation; it is held until [`RecordStore::take_audit_error`].

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::audit::{AuditEntry, AuditLogger};
use crate::error::{TrackerError, TrackerResult};
use crate::models::record::now;
use crate::models::{format_timestamp, Record, RecordData, RecordKind};
use crate::reports::{MonthlySummary, Summary};

use super::file_io::{read_json_required, write_json_atomic};

/// Default name of the backing file
pub const DEFAULT_DATA_FILE: &str = "finance_data.json";

/// Backing file layout as written
#[derive(Debug, Serialize)]
struct StoreSnapshot<'a> {
    transactions: &'a [Record],
    last_updated: String,
}

/// Backing file layout as read; records are validated one by one
#[derive(Debug, Default, Deserialize)]
struct StoreFile {
    #[serde(default)]
    transactions: Vec<serde_json::Value>,
}

/// Owner of the record collection and its persistence
#[derive(Debug)]
pub struct RecordStore {
    path: PathBuf,
    records: Vec<Record>,
    audit: Option<AuditLogger>,
    audit_error: Option<TrackerError>,
}

impl RecordStore {
    /// Open the store at `path`
    ///
    /// A missing file is created with an empty snapshot. An existing file is
    /// loaded; if any record in it is malformed the error is returned rather
    /// than handing back an empty store that would overwrite the file.
    pub fn open(path: impl Into<PathBuf>) -> TrackerResult<Self> {
        let mut store = Self {
            path: path.into(),
            records: Vec::new(),
            audit: None,
            audit_error: None,
        };

        if store.path.exists() {
            store.load()?;
        } else {
            store.persist()?;
        }

        Ok(store)
    }

    /// Record every successful mutation in the given audit log
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read-only view of the records in insertion order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by id
    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Append a record and persist
    ///
    /// # Errors
    ///
    /// Returns `Duplicate` (without touching memory or disk) if a record with
    /// the same id is already stored, or `Io` if the write fails. In the
    /// latter case the record stays in memory. Audit failures are not
    /// returned here.
    pub fn add(&mut self, record: Record) -> TrackerResult<()> {
        if self.get(record.id().as_str()).is_some() {
            return Err(TrackerError::Duplicate {
                entity_type: "Record",
                identifier: record.id().to_string(),
            });
        }

        let entry = AuditEntry::create(&record);
        self.records.push(record);
        self.persist()?;
        self.audit(&[entry]);
        Ok(())
    }

    /// Remove the record with the given id
    ///
    /// Returns `Ok(false)` without writing anything if no record matched.
    pub fn delete(&mut self, id: &str) -> TrackerResult<bool> {
        let Some(index) = self.records.iter().position(|r| r.id() == id) else {
            return Ok(false);
        };

        let removed = self.records.remove(index);
        self.persist()?;
        self.audit(&[AuditEntry::delete(&removed)]);
        Ok(true)
    }

    /// Remove every record and persist the empty state
    ///
    /// Returns the number of records removed.
    pub fn clear(&mut self) -> TrackerResult<usize> {
        let removed = std::mem::take(&mut self.records);
        self.persist()?;

        let entries: Vec<_> = removed.iter().map(AuditEntry::delete).collect();
        self.audit(&entries);
        Ok(removed.len())
    }

    /// All records, most recent first
    ///
    /// Records with equal timestamps keep their insertion order.
    pub fn list_all(&self) -> Vec<Record> {
        let mut records = self.records.clone();
        records.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
        records
    }

    /// Records in `category` (case-insensitive), in insertion order
    pub fn filter_by_category(&self, category: &str) -> Vec<Record> {
        let category = category.to_lowercase();
        self.records
            .iter()
            .filter(|r| r.category() == category)
            .cloned()
            .collect()
    }

    /// Records of the given kind, in insertion order
    pub fn filter_by_kind(&self, kind: RecordKind) -> Vec<Record> {
        self.records
            .iter()
            .filter(|r| r.kind() == kind)
            .cloned()
            .collect()
    }

    /// Records dated between `start` and `end` inclusive, in insertion order
    pub fn filter_by_date_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<Record> {
        self.records
            .iter()
            .filter(|r| r.date() >= start && r.date() <= end)
            .cloned()
            .collect()
    }

    /// Totals and per-category breakdowns over all records
    pub fn summarize(&self) -> Summary {
        Summary::from_records(&self.records)
    }

    /// Totals for one calendar month
    pub fn monthly_summary(&self, year: i32, month: u32) -> MonthlySummary {
        MonthlySummary::for_month(&self.records, year, month)
    }

    /// Rewrite the backing file with the current collection
    pub fn persist(&self) -> TrackerResult<()> {
        let snapshot = StoreSnapshot {
            transactions: &self.records,
            last_updated: format_timestamp(&now()),
        };
        write_json_atomic(&self.path, &snapshot)
    }

    /// Replace the in-memory collection with the backing file's contents
    ///
    /// Any unreadable file or malformed record aborts the load and leaves
    /// the collection empty.
    pub fn load(&mut self) -> TrackerResult<()> {
        match self.read_records() {
            Ok(records) => {
                self.records = records;
                Ok(())
            }
            Err(e) => {
                self.records.clear();
                Err(e)
            }
        }
    }

    fn read_records(&self) -> TrackerResult<Vec<Record>> {
        let file: StoreFile = read_json_required(&self.path)?;

        file.transactions
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                let data: RecordData = serde_json::from_value(value).map_err(|e| {
                    TrackerError::MalformedRecord(format!("record #{}: {}", index, e))
                })?;
                Record::from_data(data)
            })
            .collect()
    }

    /// Write a self-contained export document to `destination`
    ///
    /// The backing file and the collection are not touched.
    pub fn export_snapshot(&self, destination: impl AsRef<Path>) -> TrackerResult<()> {
        crate::export::export_snapshot(self, destination)
    }

    /// Take the error from the most recent failed audit write, if any
    ///
    /// The mutation that triggered it was still persisted.
    pub fn take_audit_error(&mut self) -> Option<TrackerError> {
        self.audit_error.take()
    }

    fn audit(&mut self, entries: &[AuditEntry]) {
        if let Some(logger) = &self.audit {
            if let Err(e) = logger.log_batch(entries) {
                self.audit_error = Some(e);
            }
        }
    }
}
