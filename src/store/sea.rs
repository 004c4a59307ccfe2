//! `SeaORM` implementation of [`LedgerStore`].
//!
//! Delegates to the `core` CRUD functions and publishes a [`ChangeEvent`] after
//! each write commits, standing in for the hosted backend's realtime feed.

use super::{ChangeEvent, ChangeFeed, ChangeKind, ChangeSubscription, ChangeTable, LedgerStore};
use crate::{
    core::{
        donation, expense,
        records::{
            Donation, DonationInput, Expense, ExpenseInput, FestivalSettings, SettingsInput,
        },
        settings,
    },
    errors::Result,
};
use async_trait::async_trait;
use sea_orm::DatabaseConnection;

/// Ledger store over a `SeaORM` connection.
#[derive(Clone, Debug)]
pub struct SeaOrmStore {
    db: DatabaseConnection,
    feed: ChangeFeed,
}

impl SeaOrmStore {
    /// Wraps a connection whose tables already exist.
    #[must_use]
    pub fn new(db: DatabaseConnection, change_feed_capacity: usize) -> Self {
        Self {
            db,
            feed: ChangeFeed::new(change_feed_capacity),
        }
    }

    /// The underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    fn notify(&self, table: ChangeTable, kind: ChangeKind) {
        self.feed.publish(ChangeEvent::new(table, kind));
    }
}

#[async_trait]
impl LedgerStore for SeaOrmStore {
    async fn list_donations(&self) -> Result<Vec<Donation>> {
        donation::list_donations(&self.db).await
    }

    async fn list_expenses(&self) -> Result<Vec<Expense>> {
        expense::list_expenses(&self.db).await
    }

    async fn get_settings(&self) -> Result<Option<FestivalSettings>> {
        settings::get_settings(&self.db).await
    }

    async fn get_donation(&self, id: &str) -> Result<Option<Donation>> {
        donation::get_donation_by_id(&self.db, id).await
    }

    async fn get_expense(&self, id: &str) -> Result<Option<Expense>> {
        expense::get_expense_by_id(&self.db, id).await
    }

    async fn create_donation(&self, input: DonationInput) -> Result<Donation> {
        let created = donation::create_donation(&self.db, input).await?;
        self.notify(ChangeTable::Donations, ChangeKind::Insert);
        Ok(created)
    }

    async fn update_donation(&self, id: &str, input: DonationInput) -> Result<Donation> {
        let updated = donation::update_donation(&self.db, id, input).await?;
        self.notify(ChangeTable::Donations, ChangeKind::Update);
        Ok(updated)
    }

    async fn delete_donation(&self, id: &str) -> Result<()> {
        donation::delete_donation(&self.db, id).await?;
        self.notify(ChangeTable::Donations, ChangeKind::Delete);
        Ok(())
    }

    async fn create_expense(&self, input: ExpenseInput) -> Result<Expense> {
        let created = expense::create_expense(&self.db, input).await?;
        self.notify(ChangeTable::Expenses, ChangeKind::Insert);
        Ok(created)
    }

    async fn update_expense(&self, id: &str, input: ExpenseInput) -> Result<Expense> {
        let updated = expense::update_expense(&self.db, id, input).await?;
        self.notify(ChangeTable::Expenses, ChangeKind::Update);
        Ok(updated)
    }

    async fn delete_expense(&self, id: &str) -> Result<()> {
        expense::delete_expense(&self.db, id).await?;
        self.notify(ChangeTable::Expenses, ChangeKind::Delete);
        Ok(())
    }

    async fn upsert_settings(&self, input: SettingsInput) -> Result<FestivalSettings> {
        let saved = settings::upsert_settings(&self.db, input).await?;
        self.notify(ChangeTable::Settings, ChangeKind::Update);
        Ok(saved)
    }

    fn subscribe_to_changes(&self) -> ChangeSubscription {
        self.feed.subscribe()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::money::Money;
    use crate::errors::{Error, Result};
    use crate::store::ChangeNotice;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_writes_publish_change_events() -> Result<()> {
        let store = setup_test_store().await?;
        let mut sub = store.subscribe_to_changes();

        let donation = store
            .create_donation(DonationInput::new(
                "Ravi",
                Money::from_major_units(500),
                test_date(27),
            ))
            .await?;
        assert_eq!(
            sub.recv().await,
            Some(ChangeNotice::Changed(ChangeEvent::new(
                ChangeTable::Donations,
                ChangeKind::Insert
            )))
        );

        store.delete_donation(&donation.id).await?;
        assert_eq!(
            sub.recv().await,
            Some(ChangeNotice::Changed(ChangeEvent::new(
                ChangeTable::Donations,
                ChangeKind::Delete
            )))
        );

        store.upsert_settings(test_settings_input(10_000)).await?;
        assert_eq!(
            sub.recv().await,
            Some(ChangeNotice::Changed(ChangeEvent::new(
                ChangeTable::Settings,
                ChangeKind::Update
            )))
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_write_publishes_nothing() -> Result<()> {
        let store = setup_test_store().await?;
        let mut sub = store.subscribe_to_changes();

        let result = store.delete_expense("missing").await;
        assert!(matches!(result, Err(Error::NotFound { .. })));

        // Follow with a real write; it must be the first event seen.
        store
            .create_expense(crate::core::records::ExpenseInput::new(
                "Lights",
                Money::from_major_units(800),
                crate::core::records::ExpenseCategory::Utilities,
                test_date(26),
            ))
            .await?;
        assert_eq!(
            sub.recv().await,
            Some(ChangeNotice::Changed(ChangeEvent::new(
                ChangeTable::Expenses,
                ChangeKind::Insert
            )))
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_reads_go_through_to_database() -> Result<()> {
        let store = setup_test_store().await?;
        create_test_donation(store.connection(), "Asha", 250).await?;
        create_test_expense(store.connection(), "Flowers", 100).await?;

        assert_eq!(store.list_donations().await?.len(), 1);
        assert_eq!(store.list_expenses().await?.len(), 1);
        assert!(store.get_settings().await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_get_by_id_reads_current_row() -> Result<()> {
        let store = setup_test_store().await?;
        let donation = create_test_donation(store.connection(), "Asha", 250).await?;
        let expense = create_test_expense(store.connection(), "Flowers", 100).await?;

        let found = store.get_donation(&donation.id).await?.unwrap();
        assert_eq!(found.amount, Money::from_major_units(250));
        assert_eq!(store.get_expense(&expense.id).await?.unwrap().title, "Flowers");
        assert!(store.get_donation("missing").await?.is_none());
        assert!(store.get_expense(&donation.id).await?.is_none());
        Ok(())
    }
}
