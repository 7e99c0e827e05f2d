//! Display formatting for terminal output
//!
//! This module provides formatters that render records and reports
//! as plain text for the command line.

pub mod record;
pub mod report;

pub use record::{format_record_details, format_record_table};
pub use report::{format_monthly_summary, format_summary};
