//! Record CLI commands
//!
//! Adding, listing, filtering and removing records.

use chrono::NaiveDate;
use clap::{Args, Subcommand};

use crate::config::Settings;
use crate::display::{format_record_details, format_record_table};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{parse_timestamp, Money, Record, RecordKind};
use crate::storage::RecordStore;

/// Arguments shared by `add income` and `add expense`
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Amount (e.g., "12.50" or "$1,200")
    pub amount: String,
    /// Description
    #[arg(short, long, default_value = "")]
    pub description: String,
    /// Category name; unknown categories are filed under "other"
    #[arg(short, long, default_value = "other")]
    pub category: String,
    /// Date (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS), defaults to now
    #[arg(long)]
    pub date: Option<String>,
}

/// Add subcommands
#[derive(Subcommand, Debug)]
pub enum AddCommands {
    /// Record money coming in
    Income(AddArgs),
    /// Record money going out
    Expense(AddArgs),
}

/// Read-only record queries
#[derive(Debug)]
pub enum FilterCommand {
    Category(String),
    Kind(String),
    Range { start: String, end: String },
}

/// Handle `add income|expense`
pub fn handle_add_command(
    store: &mut RecordStore,
    settings: &Settings,
    cmd: AddCommands,
) -> TrackerResult<()> {
    let (kind, args) = match cmd {
        AddCommands::Income(args) => (RecordKind::Income, args),
        AddCommands::Expense(args) => (RecordKind::Expense, args),
    };

    let record = build_record(settings, kind, args)?;
    let details = format_record_details(&record, settings);
    store.add(record)?;

    println!("Added {}:", kind);
    print!("{}", details);
    warn_on_audit_error(store);
    Ok(())
}

/// Report a failed audit write; the mutation itself already succeeded
fn warn_on_audit_error(store: &mut RecordStore) {
    if let Some(e) = store.take_audit_error() {
        eprintln!("Warning: audit log not updated: {}", e);
    }
}

fn build_record(settings: &Settings, kind: RecordKind, args: AddArgs) -> TrackerResult<Record> {
    let amount = Money::parse(&args.amount).map_err(|e| {
        TrackerError::Validation(format!(
            "Invalid amount: '{}'. Use format like '12.50' or '100'. Error: {}",
            args.amount, e
        ))
    })?;

    if !amount.is_positive() {
        return Err(TrackerError::Validation(
            "Amount must be greater than zero".into(),
        ));
    }

    let timestamp = match args.date {
        Some(date_str) => Some(parse_timestamp(&date_str).ok_or_else(|| {
            TrackerError::Validation(format!(
                "Invalid date format: '{}'. Use YYYY-MM-DD",
                date_str
            ))
        })?),
        None => None,
    };

    let category = settings.resolve_category(kind, &args.category);

    Ok(Record::of_kind(
        amount,
        args.description.trim(),
        &category,
        kind,
        timestamp,
    ))
}

/// Handle `list`: every record, most recent first
pub fn handle_list_command(
    store: &RecordStore,
    settings: &Settings,
    limit: Option<usize>,
) -> TrackerResult<()> {
    let mut records = store.list_all();
    let total = records.len();
    if let Some(limit) = limit {
        records.truncate(limit);
    }

    print!("{}", format_record_table(&records, settings));
    if records.len() < total {
        println!("\nShowing {} of {} records", records.len(), total);
    } else {
        println!("\n{} records", total);
    }
    Ok(())
}

/// Handle `category`, `kind` and `range`
pub fn handle_filter_command(
    store: &RecordStore,
    settings: &Settings,
    cmd: FilterCommand,
) -> TrackerResult<()> {
    let records = match cmd {
        FilterCommand::Category(name) => store.filter_by_category(&name),
        FilterCommand::Kind(kind) => store.filter_by_kind(RecordKind::parse(&kind)?),
        FilterCommand::Range { start, end } => {
            let start = parse_date(&start)?;
            let end = parse_date(&end)?;
            if start > end {
                return Err(TrackerError::Validation(format!(
                    "Start date {} is after end date {}",
                    start, end
                )));
            }
            store.filter_by_date_range(start, end)
        }
    };

    print!("{}", format_record_table(&records, settings));
    println!("\n{} records", records.len());
    Ok(())
}

fn parse_date(s: &str) -> TrackerResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
        TrackerError::Validation(format!("Invalid date format: '{}'. Use YYYY-MM-DD", s))
    })
}

/// Handle `delete <id>`
pub fn handle_delete_command(store: &mut RecordStore, id: &str) -> TrackerResult<()> {
    if store.delete(id)? {
        println!("Deleted record {}", id);
        warn_on_audit_error(store);
        Ok(())
    } else {
        Err(TrackerError::record_not_found(id))
    }
}

/// Handle `clear`; refuses to run without confirmation
pub fn handle_clear_command(store: &mut RecordStore, confirmed: bool) -> TrackerResult<()> {
    if !confirmed {
        return Err(TrackerError::Validation(
            "Refusing to delete all records without --yes".into(),
        ));
    }

    let removed = store.clear()?;
    println!("Removed {} records", removed);
    warn_on_audit_error(store);
    Ok(())
}
