//! Record display formatting
//!
//! Renders record lists as tables and single records as detail blocks.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::report::{format_date, truncate};
use crate::config::Settings;
use crate::models::Record;

const DESCRIPTION_WIDTH: usize = 24;

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: &'static str,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl RecordRow {
    fn new(record: &Record, settings: &Settings) -> Self {
        Self {
            id: record.id().short().to_string(),
            date: format_date(&record.timestamp(), &settings.date_format),
            kind: record.kind().label(),
            category: record.category().to_string(),
            description: truncate(record.description(), DESCRIPTION_WIDTH),
            amount: record.amount().format_with_symbol(&settings.currency_symbol),
        }
    }
}

/// Format a list of records as a table
pub fn format_record_table(records: &[Record], settings: &Settings) -> String {
    if records.is_empty() {
        return "No records found.\n".to_string();
    }

    let rows: Vec<RecordRow> = records
        .iter()
        .map(|r| RecordRow::new(r, settings))
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}

/// Format a single record for display
pub fn format_record_details(record: &Record, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Record:      {}\n", record.id()));
    output.push_str(&format!(
        "Date:        {}\n",
        record.timestamp().format("%Y-%m-%d %H:%M")
    ));
    output.push_str(&format!("Type:        {}\n", record.kind().label()));
    output.push_str(&format!("Category:    {}\n", record.category()));
    output.push_str(&format!(
        "Amount:      {}\n",
        record.amount().format_with_symbol(&settings.currency_symbol)
    ));

    if !record.description().is_empty() {
        output.push_str(&format!("Description: {}\n", record.description()));
    }

    output
}
