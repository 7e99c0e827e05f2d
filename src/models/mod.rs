//! Core data models for the finance tracker
//!
//! This module contains the data structures that represent one money
//! movement: the record itself, its identifier, its kind and the money type.

pub mod ids;
pub mod money;
pub mod record;

pub use ids::RecordId;
pub use money::{Money, MoneyParseError};
pub use record::{format_timestamp, parse_timestamp, Record, RecordData, RecordKind};
