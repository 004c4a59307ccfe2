//! One complete, internally consistent view of the ledger.

use crate::{
    core::{
        display::most_recent,
        records::{Donation, Expense, FestivalSettings},
        summary::{FinancialSummary, GoalProgress, compute_summary},
    },
    errors::Result,
};
use chrono::{DateTime, Utc};

/// Everything one reload fetched, plus the figures derived from it.
///
/// Snapshots are immutable once built; the engine swaps whole snapshots and
/// readers hold them behind an `Arc`.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    /// Sequence number of the reload that produced this snapshot
    pub sequence: u64,
    /// Donations, newest first
    pub donations: Vec<Donation>,
    /// Expenses, newest first
    pub expenses: Vec<Expense>,
    /// Festival settings, if configured
    pub settings: Option<FestivalSettings>,
    /// Totals over `donations` and `expenses`
    pub summary: FinancialSummary,
    /// When the reload completed
    pub loaded_at: DateTime<Utc>,
}

impl Snapshot {
    /// Builds a snapshot, computing the summary from the given lists.
    ///
    /// # Errors
    /// [`Error::AmountOverflow`](crate::errors::Error::AmountOverflow) when the
    /// totals do not fit.
    pub fn new(
        sequence: u64,
        donations: Vec<Donation>,
        expenses: Vec<Expense>,
        settings: Option<FestivalSettings>,
    ) -> Result<Self> {
        let summary = compute_summary(&donations, &expenses)?;
        Ok(Self {
            sequence,
            donations,
            expenses,
            settings,
            summary,
            loaded_at: Utc::now(),
        })
    }

    /// Goal figures, or `None` without settings or a positive goal.
    #[must_use]
    pub fn goal_progress(&self) -> Option<GoalProgress> {
        let settings = self.settings.as_ref()?;
        GoalProgress::new(self.summary.total_donations, settings.fundraising_goal)
    }

    /// The `limit` most recent donations.
    #[must_use]
    pub fn recent_donations(&self, limit: usize) -> &[Donation] {
        most_recent(&self.donations, limit)
    }

    /// The `limit` most recent expenses.
    #[must_use]
    pub fn recent_expenses(&self, limit: usize) -> &[Expense] {
        most_recent(&self.expenses, limit)
    }
}
