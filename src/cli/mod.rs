//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the record store.

pub mod export;
pub mod record;
pub mod report;

pub use export::{handle_audit_command, handle_export_command, ExportFormat};
pub use record::{
    handle_add_command, handle_clear_command, handle_delete_command, handle_filter_command,
    handle_list_command, AddArgs, AddCommands, FilterCommand,
};
pub use report::{handle_monthly_command, handle_summary_command};
