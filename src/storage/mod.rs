//! Storage layer for the finance tracker
//!
//! Provides JSON file storage with atomic writes and the record store that
//! owns the in-memory collection.

pub mod file_io;
pub mod store;

pub use file_io::{read_json_required, write_json_atomic};
pub use store::{RecordStore, DEFAULT_DATA_FILE};

use std::path::PathBuf;

use crate::audit::AuditLogger;
use crate::config::{Settings, TrackerPaths};
use crate::error::TrackerError;

/// Open the record store the way the command line does
///
/// Uses `data_file` when given, otherwise the settings' file name inside the
/// base directory. Attaches the audit log when auditing is enabled.
pub fn open_store(
    paths: &TrackerPaths,
    settings: &Settings,
    data_file: Option<PathBuf>,
) -> Result<RecordStore, TrackerError> {
    paths.ensure_directories()?;

    let path = data_file.unwrap_or_else(|| paths.data_file_named(&settings.data_file_name));
    let store = RecordStore::open(path)?;

    if settings.audit_enabled {
        Ok(store.with_audit(AuditLogger::new(paths.audit_log())))
    } else {
        Ok(store)
    }
}
