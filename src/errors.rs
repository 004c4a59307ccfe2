//! Unified error type for the festival ledger.
//!
//! Validation failures are raised before any write reaches the store; store
//! failures (`Database`, `Timeout`) propagate to whoever started the operation.

use thiserror::Error;

/// All errors produced by the ledger, its store, and the bot layer.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or is inconsistent
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// A required field is missing or malformed
    #[error("Invalid {field}: {message}")]
    Validation {
        /// Name of the offending field
        field: &'static str,
        /// Why the value was rejected
        message: String,
    },

    /// Money amounts must be finite and strictly positive
    #[error("Invalid amount: {amount} (must be a positive number)")]
    InvalidAmount {
        /// The rejected amount as supplied by the caller
        amount: f64,
    },

    /// A total went beyond the range `Money` can represent
    #[error("Amount overflow while computing {context}")]
    AmountOverflow {
        /// The figure being computed
        context: &'static str,
    },

    /// Update or delete referenced a record that does not exist
    #[error("{kind} '{id}' not found")]
    NotFound {
        /// Record kind, e.g. `"donation"`
        kind: &'static str,
        /// The id that was looked up
        id: String,
    },

    /// A row read back from the store failed validation
    #[error("Stored {kind} '{id}' is invalid: {reason}")]
    InvalidRecord {
        /// Record kind, e.g. `"expense"`
        kind: &'static str,
        /// Id of the stored row
        id: String,
        /// What was wrong with it
        reason: String,
    },

    /// A store round-trip did not finish within the configured timeout
    #[error("Timed out waiting for {operation}")]
    Timeout {
        /// The operation that stalled
        operation: &'static str,
    },

    /// The caller has no admin session
    #[error("Admin sign-in required")]
    Unauthorized,

    /// Database error from `SeaORM`
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Formatting error while building a reply
    #[error("Formatting error: {0}")]
    Format(#[from] std::fmt::Error),

    /// Integer conversion error
    #[error("Integer conversion error: {0}")]
    IntConversion(#[from] std::num::TryFromIntError),

    /// Serenity/Poise framework error
    #[error("Serenity/Poise framework error: {0}")]
    #[allow(clippy::enum_variant_names)]
    FrameworkError(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::FrameworkError(Box::new(value))
    }
}

impl Error {
    /// Shorthand for a [`Error::Validation`] error.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Returns true for errors caused by connectivity rather than bad input.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Database(_) | Self::Timeout { .. } | Self::Io(_))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
