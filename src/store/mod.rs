//! Data-access boundary for the ledger.
//!
//! [`LedgerStore`] is everything the engine and the admin actions need from the
//! backing store: full-list reads, validated writes, and a change feed. The
//! production implementation is [`SeaOrmStore`]; tests substitute scripted fakes.

/// In-process change notification feed
pub mod changes;
/// `SeaORM`-backed store
pub mod sea;

pub use changes::{ChangeEvent, ChangeFeed, ChangeKind, ChangeNotice, ChangeSubscription, ChangeTable};
pub use sea::SeaOrmStore;

use crate::{
    core::records::{
        Donation, DonationInput, Expense, ExpenseInput, FestivalSettings, SettingsInput,
    },
    errors::Result,
};
use async_trait::async_trait;

/// Asynchronous access to the three record sets.
///
/// List reads return the full current set ordered by date, newest first. Writes
/// validate their input and fail with [`Error::Validation`](crate::errors::Error::Validation),
/// [`Error::NotFound`](crate::errors::Error::NotFound) or a transient store error.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// All donations, newest first.
    async fn list_donations(&self) -> Result<Vec<Donation>>;

    /// All expenses, newest first.
    async fn list_expenses(&self) -> Result<Vec<Expense>>;

    /// The settings singleton, if written.
    async fn get_settings(&self) -> Result<Option<FestivalSettings>>;

    /// One donation by id, read from the store rather than a cached snapshot.
    async fn get_donation(&self, id: &str) -> Result<Option<Donation>>;

    /// One expense by id.
    async fn get_expense(&self, id: &str) -> Result<Option<Expense>>;

    /// Adds a donation.
    async fn create_donation(&self, input: DonationInput) -> Result<Donation>;

    /// Replaces an existing donation's fields.
    async fn update_donation(&self, id: &str, input: DonationInput) -> Result<Donation>;

    /// Permanently removes a donation.
    async fn delete_donation(&self, id: &str) -> Result<()>;

    /// Adds an expense.
    async fn create_expense(&self, input: ExpenseInput) -> Result<Expense>;

    /// Replaces an existing expense's fields.
    async fn update_expense(&self, id: &str, input: ExpenseInput) -> Result<Expense>;

    /// Permanently removes an expense.
    async fn delete_expense(&self, id: &str) -> Result<()>;

    /// Inserts or replaces the settings singleton.
    async fn upsert_settings(&self, input: SettingsInput) -> Result<FestivalSettings>;

    /// Starts receiving change notifications. Drop the subscription to stop.
    fn subscribe_to_changes(&self) -> ChangeSubscription;
}
