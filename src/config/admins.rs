//! Admin access configuration from environment variables.
//!
//! `ADMIN_PASSPHRASE` enables admin sign-in; without it every sign-in attempt
//! is refused. `ADMIN_USER_IDS` optionally restricts sign-in to a comma-separated
//! list of Discord user IDs.

use crate::errors::{Error, Result};
use std::collections::HashSet;

/// Admin sign-in settings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdminConfig {
    /// Shared admin passphrase; `None` disables admin sign-in
    pub passphrase: Option<String>,
    /// Users allowed to sign in; `None` allows anyone with the passphrase
    pub allowed_user_ids: Option<HashSet<u64>>,
}

impl AdminConfig {
    /// Reads `ADMIN_PASSPHRASE` and `ADMIN_USER_IDS`.
    ///
    /// # Errors
    /// [`Error::Config`] if `ADMIN_USER_IDS` contains something that is not a user ID.
    pub fn from_env() -> Result<Self> {
        let passphrase = std::env::var("ADMIN_PASSPHRASE")
            .ok()
            .filter(|p| !p.trim().is_empty());
        let allowed_user_ids = std::env::var("ADMIN_USER_IDS")
            .ok()
            .map(|raw| parse_user_ids(&raw))
            .transpose()?
            .filter(|ids| !ids.is_empty());
        Ok(Self {
            passphrase,
            allowed_user_ids,
        })
    }

    /// True when the user passes the allow-list (or there is none).
    #[must_use]
    pub fn is_allowed(&self, user_id: u64) -> bool {
        self.allowed_user_ids
            .as_ref()
            .is_none_or(|ids| ids.contains(&user_id))
    }
}

/// Parses a comma-separated list of Discord user IDs, ignoring blanks.
pub fn parse_user_ids(raw: &str) -> Result<HashSet<u64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<u64>().map_err(|e| Error::Config {
                message: format!("ADMIN_USER_IDS entry '{part}' is not a user ID: {e}"),
            })
        })
        .collect()
}
