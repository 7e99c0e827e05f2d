//! Finance tracker - personal income and expense records
//!
//! This library keeps a list of income and expense records in a single JSON
//! file and answers questions about them: totals, per-category breakdowns,
//! monthly figures and filtered views.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (records, kinds, ids, money)
//! - `storage`: JSON file storage and the record store
//! - `reports`: Summary and monthly aggregation
//! - `export`: JSON snapshot and CSV export
//! - `audit`: Audit logging of mutations
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `fintrack` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use finance_tracker::models::{Money, Record};
//! use finance_tracker::storage::RecordStore;
//!
//! let mut store = RecordStore::open("finance_data.json")?;
//! store.add(Record::new(Money::from_cents(2500), "Lunch", "food", "expense", None)?)?;
//! println!("{}", store.summarize().balance);
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod storage;

pub use error::{TrackerError, TrackerResult};
