use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use finance_tracker::audit::AuditLogger;
use finance_tracker::cli::{
    handle_add_command, handle_audit_command, handle_clear_command, handle_delete_command,
    handle_export_command, handle_filter_command, handle_list_command, handle_monthly_command,
    handle_summary_command, AddCommands, ExportFormat, FilterCommand,
};
use finance_tracker::config::{Settings, TrackerPaths};
use finance_tracker::storage::open_store;

#[derive(Parser)]
#[command(
    name = "fintrack",
    version,
    about = "Track personal income and expenses from the terminal",
    long_about = "fintrack keeps your income and expense records in a single JSON \
                  file and reports totals, category breakdowns and monthly figures."
)]
struct Cli {
    /// Use this data file instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    data_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add an income or expense record
    #[command(subcommand)]
    Add(AddCommands),

    /// List all records, most recent first
    #[command(alias = "ls")]
    List {
        /// Number of records to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show records in a category
    Category {
        /// Category name (case-insensitive)
        name: String,
    },

    /// Show records of one kind
    Kind {
        /// income or expense
        kind: String,
    },

    /// Show records between two dates (inclusive)
    Range {
        /// Start date (YYYY-MM-DD)
        start: String,
        /// End date (YYYY-MM-DD)
        end: String,
    },

    /// Show totals and category breakdowns
    Summary,

    /// Show totals for one month
    Monthly {
        /// Year (e.g., 2024)
        year: i32,
        /// Month (1-12)
        #[arg(value_parser = clap::value_parser!(u32).range(1..=12))]
        month: u32,
    },

    /// Delete a record by ID
    #[command(alias = "rm")]
    Delete {
        /// Record ID
        id: String,
    },

    /// Export all records to a file
    Export {
        /// Output file path
        output: PathBuf,
        /// Export format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,
    },

    /// Delete every record
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = TrackerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let Some(command) = cli.command else {
        println!("fintrack - personal income and expense tracker");
        println!();
        println!("Run 'fintrack --help' for usage information.");
        return Ok(());
    };

    let open = || open_store(&paths, &settings, cli.data_file.clone());

    match command {
        Commands::Add(cmd) => handle_add_command(&mut open()?, &settings, cmd)?,
        Commands::List { limit } => handle_list_command(&open()?, &settings, limit)?,
        Commands::Category { name } => {
            handle_filter_command(&open()?, &settings, FilterCommand::Category(name))?
        }
        Commands::Kind { kind } => {
            handle_filter_command(&open()?, &settings, FilterCommand::Kind(kind))?
        }
        Commands::Range { start, end } => {
            handle_filter_command(&open()?, &settings, FilterCommand::Range { start, end })?
        }
        Commands::Summary => handle_summary_command(&open()?, &settings)?,
        Commands::Monthly { year, month } => {
            handle_monthly_command(&open()?, &settings, year, month)?
        }
        Commands::Delete { id } => handle_delete_command(&mut open()?, &id)?,
        Commands::Export { output, format } => handle_export_command(&open()?, &output, format)?,
        Commands::Clear { yes } => handle_clear_command(&mut open()?, yes)?,
        Commands::Audit { limit } => {
            handle_audit_command(&AuditLogger::new(paths.audit_log()), limit)?
        }
        Commands::Config => {
            let data_file = cli
                .data_file
                .clone()
                .unwrap_or_else(|| paths.data_file_named(&settings.data_file_name));
            println!("Finance Tracker Configuration");
            println!("=============================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Data file:      {}", data_file.display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:    {}", settings.currency_symbol);
            println!("  Date format:        {}", settings.date_format);
            println!("  Audit enabled:      {}", settings.audit_enabled);
            println!("  Income categories:  {}", settings.income_categories.join(", "));
            println!("  Expense categories: {}", settings.expense_categories.join(", "));
        }
    }

    Ok(())
}
