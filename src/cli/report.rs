//! Report CLI commands

use crate::config::Settings;
use crate::display::{format_monthly_summary, format_summary};
use crate::error::TrackerResult;
use crate::storage::RecordStore;

/// Handle `summary`
pub fn handle_summary_command(store: &RecordStore, settings: &Settings) -> TrackerResult<()> {
    let summary = store.summarize();
    print!("{}", format_summary(&summary, settings));
    Ok(())
}

/// Handle `monthly <year> <month>`
pub fn handle_monthly_command(
    store: &RecordStore,
    settings: &Settings,
    year: i32,
    month: u32,
) -> TrackerResult<()> {
    let summary = store.monthly_summary(year, month);
    print!("{}", format_monthly_summary(&summary, settings));
    Ok(())
}
