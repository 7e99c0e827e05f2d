//! Configuration module for the finance tracker
//!
//! This module provides configuration management including:
//! - Platform-aware path resolution
//! - User settings persistence (currency, date format, category lists)

pub mod paths;
pub mod settings;

pub use paths::TrackerPaths;
pub use settings::Settings;
