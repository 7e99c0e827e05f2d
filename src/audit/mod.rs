//! Audit logging for the finance tracker
//!
//! Every successful mutation of the record store is appended to a
//! line-delimited JSON log (JSONL): adding a record writes a create entry,
//! deleting or clearing writes one delete entry per removed record.
//!
//! # Example
//!
//! ```rust,ignore
//! use finance_tracker::audit::{AuditEntry, AuditLogger};
//!
//! let logger = AuditLogger::new(audit_log_path);
//! logger.log(&AuditEntry::create(&record))?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
