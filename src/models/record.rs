//! Record model
//!
//! A record is one income or expense entry. Records are immutable once
//! built: the amount is stored as an absolute value, category and kind are
//! lowercased, and the kind is validated, so no record can exist in an
//! invalid state.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use super::ids::RecordId;
use super::money::Money;
use crate::error::{TrackerError, TrackerResult};

/// Format used when writing timestamps
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Direction of money flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Income,
    Expense,
}

impl RecordKind {
    /// Parse a kind case-insensitively
    pub fn parse(s: &str) -> TrackerResult<Self> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(TrackerError::InvalidKind(s.to_string())),
        }
    }

    /// Lowercase name as stored on disk
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Capitalized name for display
    pub fn label(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A single income or expense entry
///
/// Identity is the `id` alone: two records with the same id compare equal
/// and hash the same regardless of their other fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RecordData", into = "RecordData")]
pub struct Record {
    id: RecordId,
    amount: Money,
    description: String,
    category: String,
    kind: RecordKind,
    timestamp: NaiveDateTime,
}

impl Record {
    /// Create a new record from a kind given as text
    ///
    /// The sign of `amount` is discarded, `category` and `kind` are
    /// lowercased and `timestamp` defaults to the current local time.
    ///
    /// # Errors
    ///
    /// Returns `InvalidKind` if `kind` is not "income" or "expense".
    pub fn new(
        amount: Money,
        description: impl Into<String>,
        category: &str,
        kind: &str,
        timestamp: Option<NaiveDateTime>,
    ) -> TrackerResult<Self> {
        let kind = RecordKind::parse(kind)?;
        Ok(Self::of_kind(amount, description, category, kind, timestamp))
    }

    /// Create a new record with an already-typed kind
    pub fn of_kind(
        amount: Money,
        description: impl Into<String>,
        category: &str,
        kind: RecordKind,
        timestamp: Option<NaiveDateTime>,
    ) -> Self {
        Self {
            id: RecordId::new(),
            amount: amount.abs(),
            description: description.into(),
            category: category.to_lowercase(),
            kind,
            timestamp: timestamp.unwrap_or_else(now),
        }
    }

    pub fn id(&self) -> &RecordId {
        &self.id
    }

    /// Absolute amount; the kind carries the direction
    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Calendar date of the timestamp
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    pub fn is_income(&self) -> bool {
        self.kind == RecordKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == RecordKind::Expense
    }

    /// Amount with sign applied: positive for income, negative for expense
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            RecordKind::Income => self.amount,
            RecordKind::Expense => -self.amount,
        }
    }

    /// Check whether the record falls in the given calendar month
    pub fn falls_in_month(&self, year: i32, month: u32) -> bool {
        self.timestamp.year() == year && self.timestamp.month() == month
    }

    /// Convert to the flat serializable form
    pub fn to_data(&self) -> RecordData {
        RecordData {
            transaction_id: self.id.to_string(),
            amount: self.amount.units(),
            description: self.description.clone(),
            category: self.category.clone(),
            transaction_type: self.kind.as_str().to_string(),
            date: format_timestamp(&self.timestamp),
        }
    }

    /// Rebuild a record from its serializable form, keeping the stored id
    ///
    /// # Errors
    ///
    /// Returns `MalformedRecord` if the amount or date cannot be parsed or
    /// the kind is not valid.
    pub fn from_data(data: RecordData) -> TrackerResult<Self> {
        let amount = Money::from_units(data.amount).ok_or_else(|| {
            TrackerError::MalformedRecord(format!(
                "record {}: invalid amount {}",
                data.transaction_id, data.amount
            ))
        })?;

        let timestamp = parse_timestamp(&data.date).ok_or_else(|| {
            TrackerError::MalformedRecord(format!(
                "record {}: invalid date '{}'",
                data.transaction_id, data.date
            ))
        })?;

        let kind = RecordKind::parse(&data.transaction_type).map_err(|e| {
            TrackerError::MalformedRecord(format!("record {}: {}", data.transaction_id, e))
        })?;

        let mut record = Self::of_kind(
            amount,
            data.description,
            &data.category,
            kind,
            Some(timestamp),
        );
        record.id = RecordId::from_string(data.transaction_id);
        Ok(record)
    }

    /// Convert to a flat key-value map
    pub fn to_map(&self) -> serde_json::Map<String, serde_json::Value> {
        let data = self.to_data();
        let mut map = serde_json::Map::new();
        map.insert("transaction_id".into(), data.transaction_id.into());
        map.insert("amount".into(), data.amount.into());
        map.insert("description".into(), data.description.into());
        map.insert("category".into(), data.category.into());
        map.insert("transaction_type".into(), data.transaction_type.into());
        map.insert("date".into(), data.date.into());
        map
    }

    /// Rebuild a record from a flat key-value map
    ///
    /// # Errors
    ///
    /// Returns `MalformedRecord` if a required field is missing or has the
    /// wrong type, or for any of the reasons listed on [`Record::from_data`].
    pub fn from_map(map: &serde_json::Map<String, serde_json::Value>) -> TrackerResult<Self> {
        let data: RecordData = serde_json::from_value(serde_json::Value::Object(map.clone()))
            .map_err(|e| TrackerError::MalformedRecord(e.to_string()))?;
        Self::from_data(data)
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Record {}

impl Hash for Record {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}: {} ({}) - {}",
            self.timestamp.format("%Y-%m-%d"),
            self.kind.label(),
            self.amount,
            self.category,
            self.description
        )
    }
}

/// Flat on-disk form of a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordData {
    pub transaction_id: String,
    pub amount: f64,
    pub description: String,
    pub category: String,
    pub transaction_type: String,
    pub date: String,
}

impl From<Record> for RecordData {
    fn from(record: Record) -> Self {
        record.to_data()
    }
}

impl TryFrom<RecordData> for Record {
    type Error = TrackerError;

    fn try_from(data: RecordData) -> Result<Self, Self::Error> {
        Record::from_data(data)
    }
}

/// Current local wall-clock time
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Render a timestamp in the canonical on-disk format
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a timestamp written by this tool or a compatible one
///
/// Accepts `YYYY-MM-DDTHH:MM:SS[.fraction]`, RFC 3339 with an offset
/// (converted to local time) and a bare `YYYY-MM-DD` (midnight).
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    if let Ok(ts) = NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT) {
        return Some(ts);
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(ts);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn ts(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_negative_amount_is_normalized() {
        let record = Record::new(Money::from_cents(-5000), "refund", "food", "expense", None)
            .unwrap();
        assert_eq!(record.amount(), Money::from_cents(5000));
    }

    #[test]
    fn test_kind_is_case_insensitive() {
        let record = Record::new(Money::from_cents(100), "pay", "Salary", "INCOME", None).unwrap();
        assert_eq!(record.kind(), RecordKind::Income);
        assert_eq!(record.category(), "salary");
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let err = Record::new(Money::from_cents(100), "x", "other", "deposit", None).unwrap_err();
        assert!(matches!(err, TrackerError::InvalidKind(k) if k == "deposit"));
    }

    #[test]
    fn test_timestamp_defaults_to_now() {
        let before = now();
        let record = Record::new(Money::from_cents(100), "x", "other", "income", None).unwrap();
        let after = now();
        assert!(record.timestamp() >= before && record.timestamp() <= after);
    }

    #[test]
    fn test_signed_amount() {
        let income = Record::of_kind(Money::from_cents(100), "", "a", RecordKind::Income, None);
        let expense = Record::of_kind(Money::from_cents(100), "", "a", RecordKind::Expense, None);
        assert_eq!(income.signed_amount().cents(), 100);
        assert_eq!(expense.signed_amount().cents(), -100);
    }

    #[test]
    fn test_map_round_trip_keeps_everything() {
        let stamp = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_micro_opt(8, 15, 42, 123_456)
            .unwrap();
        let original = Record::new(
            Money::from_cents(1999),
            "Groceries run",
            "food",
            "expense",
            Some(stamp),
        )
        .unwrap();

        let map = original.to_map();
        assert_eq!(map.len(), 6);
        assert_eq!(map["amount"], 19.99);
        assert_eq!(map["transaction_type"], "expense");
        assert_eq!(map["date"], "2024-03-09T08:15:42.123456");

        let restored = Record::from_map(&map).unwrap();
        assert_eq!(restored.id(), original.id());
        assert_eq!(restored.amount(), original.amount());
        assert_eq!(restored.description(), original.description());
        assert_eq!(restored.category(), original.category());
        assert_eq!(restored.kind(), original.kind());
        assert_eq!(restored.timestamp(), original.timestamp());
    }

    #[test]
    fn test_from_map_missing_field() {
        let mut map = Record::new(Money::from_cents(100), "x", "other", "income", None)
            .unwrap()
            .to_map();
        map.remove("amount");

        let err = Record::from_map(&map).unwrap_err();
        assert!(matches!(err, TrackerError::MalformedRecord(_)));
    }

    #[test]
    fn test_from_data_rejects_out_of_range_amount() {
        let mut data = Record::new(Money::from_cents(100), "x", "other", "income", None)
            .unwrap()
            .to_data();

        for amount in [-92_233_720_368_547_758.08, 6e16, f64::MAX] {
            data.amount = amount;
            assert!(matches!(
                Record::from_data(data.clone()),
                Err(TrackerError::MalformedRecord(_))
            ));
        }
    }

    #[test]
    fn test_of_kind_never_stores_negative_amount() {
        let record = Record::of_kind(
            Money::from_cents(i64::MIN),
            "",
            "other",
            RecordKind::Expense,
            None,
        );
        assert!(!record.amount().is_negative());
    }

    #[test]
    fn test_from_data_bad_date_and_kind() {
        let mut data = Record::new(Money::from_cents(100), "x", "other", "income", None)
            .unwrap()
            .to_data();
        data.date = "yesterday".into();
        assert!(matches!(
            Record::from_data(data.clone()),
            Err(TrackerError::MalformedRecord(_))
        ));

        data.date = "2024-01-01".into();
        data.transaction_type = "transfer".into();
        assert!(matches!(
            Record::from_data(data),
            Err(TrackerError::MalformedRecord(_))
        ));
    }

    #[test]
    fn test_parse_timestamp_variants() {
        assert_eq!(
            parse_timestamp("2024-01-15T10:30:00"),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap().and_hms_opt(10, 30, 0)
        );
        assert_eq!(
            parse_timestamp("2024-01-15"),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap().and_hms_opt(0, 0, 0)
        );
        assert!(parse_timestamp("2024-01-15T10:30:00+00:00").is_some());
        assert!(parse_timestamp("15/01/2024").is_none());
    }

    #[test]
    fn test_identity_is_id_only() {
        let a = Record::of_kind(Money::from_cents(1), "a", "x", RecordKind::Income, Some(ts(2024, 1, 1)));
        let mut data = a.to_data();
        data.description = "changed".into();
        data.amount = 99.0;
        let b = Record::from_data(data).unwrap();

        assert_eq!(a, b);
        let set: HashSet<Record> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_serde_uses_flat_form() {
        let record = Record::of_kind(
            Money::from_cents(2500),
            "Bus pass",
            "Transport",
            RecordKind::Expense,
            Some(ts(2024, 2, 1)),
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["amount"], 25.0);
        assert_eq!(json["category"], "transport");
        assert_eq!(json["transaction_id"], record.id().as_str());

        let back: Record = serde_json::from_value(json).unwrap();
        assert_eq!(back.timestamp(), record.timestamp());
    }
}
