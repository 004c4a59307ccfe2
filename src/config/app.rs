//! Application configuration loading from config.toml
//!
//! The `[festival]` table holds the defaults used to seed the settings row on
//! first run; `[refresh]` tunes the background reload. Every key is optional and
//! a missing file falls back to the built-in defaults.

use crate::{
    core::{money::Money, records::SettingsInput},
    errors::{Error, Result},
};
use chrono::{Datelike, Days, NaiveDate};
use serde::Deserialize;
use std::{path::Path, time::Duration};
use tracing::{info, warn};

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

const DEFAULT_DESCRIPTION: &str = "Join us in celebrating Lord Ganesha with devotion, community spirit, and complete financial transparency.";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Seed values for the festival settings
    pub festival: FestivalDefaults,
    /// Background refresh tuning
    pub refresh: RefreshConfig,
}

/// Seed values for the settings singleton.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct FestivalDefaults {
    /// Festival name
    pub festival_name: String,
    /// Venue
    pub location: String,
    /// Public description
    pub description: String,
    /// Days from the start date to the end date
    pub duration_days: u32,
    /// Fundraising goal in rupees
    pub fundraising_goal: f64,
}

impl Default for FestivalDefaults {
    fn default() -> Self {
        Self {
            festival_name: "Vinayaka Chavithi".to_string(),
            location: String::new(),
            description: DEFAULT_DESCRIPTION.to_string(),
            duration_days: 10,
            fundraising_goal: 50_000.0,
        }
    }
}

impl FestivalDefaults {
    /// Settings starting on `today` and running for `duration_days`, in the
    /// current year.
    pub fn to_settings_input(&self, today: NaiveDate) -> Result<SettingsInput> {
        let end_date = today
            .checked_add_days(Days::new(u64::from(self.duration_days)))
            .ok_or_else(|| Error::Config {
                message: format!("festival duration of {} days is out of range", self.duration_days),
            })?;
        Ok(SettingsInput {
            festival_name: self.festival_name.clone(),
            festival_year: today.year(),
            location: self.location.clone(),
            description: self.description.clone(),
            start_date: today,
            end_date,
            fundraising_goal: Money::non_negative(self.fundraising_goal)?,
        })
    }
}

/// Background refresh tuning.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct RefreshConfig {
    /// Seconds between polling reloads
    pub poll_interval_secs: u64,
    /// Seconds each store read may take before the reload fails
    pub fetch_timeout_secs: u64,
    /// Events buffered per change-feed subscriber
    pub change_feed_capacity: usize,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 30,
            fetch_timeout_secs: 10,
            change_feed_capacity: 64,
        }
    }
}

impl RefreshConfig {
    /// Polling period; never zero.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    /// Per-read timeout; never zero.
    #[must_use]
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs.max(1))
    }
}

/// Loads configuration from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads `./config.toml`, or the built-in defaults when the file is absent.
///
/// A file that exists but does not parse is still an error.
pub fn load_default_config() -> Result<AppConfig> {
    let path = Path::new(DEFAULT_CONFIG_PATH);
    if !path.exists() {
        warn!("{} not found, using built-in defaults", DEFAULT_CONFIG_PATH);
        return Ok(AppConfig::default());
    }
    let config = load_config(path)?;
    info!("Loaded configuration from {}", DEFAULT_CONFIG_PATH);
    Ok(config)
}
