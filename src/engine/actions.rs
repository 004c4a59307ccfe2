//! Admin reads and writes.
//!
//! Lookups by id go to the store, so an edit merges onto the record as it is
//! now, not as the last snapshot saw it. Each write through the store and then reloads the engine so the
//! caller sees the result in the next snapshot. There is no optimistic local
//! update: if the write fails, nothing changes; if the write succeeds but the
//! reload fails, the write stands and the engine reports a stale snapshot.

use super::{LedgerEngine, ReloadOutcome};
use crate::{
    core::records::{
        Donation, DonationInput, Expense, ExpenseInput, FestivalSettings, SettingsInput,
    },
    errors::{Error, Result},
};
use tracing::warn;

impl LedgerEngine {
    /// Reads one donation from the store.
    ///
    /// # Errors
    /// [`Error::NotFound`] if no such donation exists, or the store error.
    pub async fn current_donation(&self, id: &str) -> Result<Donation> {
        self.bounded("get donation", self.store.get_donation(id))
            .await?
            .ok_or_else(|| Error::NotFound {
                kind: "donation",
                id: id.to_string(),
            })
    }

    /// Reads one expense from the store.
    ///
    /// # Errors
    /// [`Error::NotFound`] if no such expense exists, or the store error.
    pub async fn current_expense(&self, id: &str) -> Result<Expense> {
        self.bounded("get expense", self.store.get_expense(id))
            .await?
            .ok_or_else(|| Error::NotFound {
                kind: "expense",
                id: id.to_string(),
            })
    }

    /// Records a new donation.
    pub async fn add_donation(&self, input: DonationInput) -> Result<Donation> {
        let donation = self.store.create_donation(input).await?;
        self.reload_after_write("add donation").await;
        Ok(donation)
    }

    /// Edits a donation in place.
    pub async fn edit_donation(&self, id: &str, input: DonationInput) -> Result<Donation> {
        let donation = self.store.update_donation(id, input).await?;
        self.reload_after_write("edit donation").await;
        Ok(donation)
    }

    /// Permanently deletes a donation.
    pub async fn remove_donation(&self, id: &str) -> Result<()> {
        self.store.delete_donation(id).await?;
        self.reload_after_write("delete donation").await;
        Ok(())
    }

    /// Records a new expense.
    pub async fn add_expense(&self, input: ExpenseInput) -> Result<Expense> {
        let expense = self.store.create_expense(input).await?;
        self.reload_after_write("add expense").await;
        Ok(expense)
    }

    /// Edits an expense in place.
    pub async fn edit_expense(&self, id: &str, input: ExpenseInput) -> Result<Expense> {
        let expense = self.store.update_expense(id, input).await?;
        self.reload_after_write("edit expense").await;
        Ok(expense)
    }

    /// Permanently deletes an expense.
    pub async fn remove_expense(&self, id: &str) -> Result<()> {
        self.store.delete_expense(id).await?;
        self.reload_after_write("delete expense").await;
        Ok(())
    }

    /// Saves the festival settings.
    pub async fn save_settings(&self, input: SettingsInput) -> Result<FestivalSettings> {
        let settings = self.store.upsert_settings(input).await?;
        self.reload_after_write("save settings").await;
        Ok(settings)
    }

    async fn reload_after_write(&self, action: &str) {
        match self.reload().await {
            Ok(ReloadOutcome::Applied(_) | ReloadOutcome::Superseded) => {}
            Err(e) => warn!("{} succeeded but the reload after it failed: {}", action, e),
        }
    }
}
