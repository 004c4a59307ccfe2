//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Public dashboard commands
pub mod dashboard;

/// Donation management commands
pub mod donation;

/// Expense management commands
pub mod expense;

/// General utility commands
pub mod general;

/// Admin sign-in and sign-out
pub mod session;

/// Festival settings and manual refresh
pub mod settings;

// Export commands
pub use dashboard::*;
pub use donation::*;
pub use expense::*;
pub use general::*;
pub use session::*;
pub use settings::*;

use crate::{
    bot::BotData,
    errors::{Error, Result},
};
use chrono::NaiveDate;

/// Every command the bot registers.
#[must_use]
pub fn all() -> Vec<poise::Command<BotData, Error>> {
    vec![
        ping(),
        help(),
        summary(),
        donations(),
        expenses(),
        festival(),
        login(),
        logout(),
        overview(),
        donation(),
        expense(),
        settings(),
        refresh(),
    ]
}

/// Parses a `YYYY-MM-DD` argument, defaulting to today's local date.
pub fn parse_date_arg(field: &'static str, raw: Option<&str>) -> Result<NaiveDate> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(chrono::Local::now().date_naive()),
        Some(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map_err(|_| Error::validation(field, format!("'{text}' is not a YYYY-MM-DD date"))),
    }
}
