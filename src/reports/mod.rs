//! Reports module for the finance tracker
//!
//! Provides the aggregate views over the record collection: the overall
//! summary with per-category breakdowns and the per-month summary.

pub mod summary;

pub use summary::{MonthlySummary, Summary};
