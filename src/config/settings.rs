//! User settings for the finance tracker
//!
//! Manages user preferences: which data file to use, how amounts and dates
//! are shown, whether mutations are audited and which categories the
//! command line offers for income and expenses.

use serde::{Deserialize, Serialize};

use super::paths::TrackerPaths;
use crate::error::TrackerError;
use crate::models::RecordKind;
use crate::storage::DEFAULT_DATA_FILE;

/// Category used when a supplied category is not on the allow-list
pub const FALLBACK_CATEGORY: &str = "other";

/// User settings for the finance tracker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// File name of the backing data file inside the base directory
    #[serde(default = "default_data_file_name")]
    pub data_file_name: String,

    /// Currency symbol used in terminal output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Whether mutations are written to the audit log
    #[serde(default = "default_true")]
    pub audit_enabled: bool,

    /// Categories offered for income records
    #[serde(default = "default_income_categories")]
    pub income_categories: Vec<String>,

    /// Categories offered for expense records
    #[serde(default = "default_expense_categories")]
    pub expense_categories: Vec<String>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_data_file_name() -> String {
    DEFAULT_DATA_FILE.to_string()
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_true() -> bool {
    true
}

fn default_income_categories() -> Vec<String> {
    ["salary", "freelance", "investment", "other"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_expense_categories() -> Vec<String> {
    [
        "food",
        "transport",
        "entertainment",
        "utilities",
        "shopping",
        "healthcare",
        "other",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            data_file_name: default_data_file_name(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            audit_enabled: default_true(),
            income_categories: default_income_categories(),
            expense_categories: default_expense_categories(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &TrackerPaths) -> Result<Self, TrackerError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                TrackerError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                TrackerError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &TrackerPaths) -> Result<(), TrackerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            TrackerError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| TrackerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Allowed categories for a record kind
    pub fn categories_for(&self, kind: RecordKind) -> &[String] {
        match kind {
            RecordKind::Income => &self.income_categories,
            RecordKind::Expense => &self.expense_categories,
        }
    }

    /// Map a user-supplied category onto the allow-list for `kind`
    ///
    /// Matching is case-insensitive; anything not on the list becomes
    /// [`FALLBACK_CATEGORY`].
    pub fn resolve_category(&self, kind: RecordKind, category: &str) -> String {
        let wanted = category.trim().to_lowercase();
        if self
            .categories_for(kind)
            .iter()
            .any(|c| c.to_lowercase() == wanted)
        {
            wanted
        } else {
            FALLBACK_CATEGORY.to_string()
        }
    }
}
