//! Trip configuration loading from config.toml
//!
//! The configuration file is optional. It can name the trip, override the suggested
//! expense categories offered by autocomplete, and list members and budgeted expenses used
//! to seed an empty database on first run.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General trip settings
    pub trip: TripConfig,
    /// Suggested categories for each kind of expense
    pub categories: CategoryConfig,
    /// Members to create when the database is empty
    pub members: Vec<MemberConfig>,
    /// Budgeted expenses to create alongside the seeded members
    pub budgeted_expenses: Vec<BudgetedExpenseConfig>,
}

/// General trip settings
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TripConfig {
    /// Trip name shown in reports
    pub name: String,
}

impl Default for TripConfig {
    fn default() -> Self {
        Self {
            name: "Trip".to_string(),
        }
    }
}

/// Category suggestions offered while recording expenses
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CategoryConfig {
    /// Suggestions for planned costs
    pub budgeted: Vec<String>,
    /// Suggestions for costs incurred during the trip
    pub added: Vec<String>,
}

impl Default for CategoryConfig {
    fn default() -> Self {
        let owned = |names: &[&str]| -> Vec<String> {
            names.iter().map(ToString::to_string).collect()
        };
        Self {
            budgeted: owned(&["Flights", "Hotel", "Car", "Gas", "Food", "Tickets", "Misc"]),
            added: owned(&["Gas", "Food", "Tickets", "Misc"]),
        }
    }
}

/// A member to seed
#[derive(Debug, Deserialize, Clone)]
pub struct MemberConfig {
    /// Display name
    pub name: String,
}

/// A budgeted expense to seed
#[derive(Debug, Deserialize, Clone)]
pub struct BudgetedExpenseConfig {
    /// Expense category
    pub category: String,
    /// Amount in dollars
    pub amount: f64,
    /// Name of the paying member; must appear in `members`
    pub payer: String,
}

/// Loads trip configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Field types do not match
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);

    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    parse_config(&contents)
}

/// Parses trip configuration from a TOML string
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads the application configuration from `SPLITFARE_CONFIG` (default `./config.toml`).
///
/// A missing file is not an error: the defaults are used and a warning is logged.
pub fn load_app_configuration() -> Result<AppConfig> {
    let path = std::env::var("SPLITFARE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());

    if !Path::new(&path).exists() {
        tracing::warn!("No configuration file at {}, using defaults", path);
        return Ok(AppConfig::default());
    }

    let config = load_config(&path)
        .inspect_err(|e| tracing::error!("Critical error loading configuration: {}", e))?;
    tracing::info!(
        "Loaded configuration for '{}' ({} seed members, {} seed budgeted expenses)",
        config.trip.name,
        config.members.len(),
        config.budgeted_expenses.len()
    );
    Ok(config)
}
