//! Financial aggregation.
//!
//! Everything here is a pure function of the record lists passed in: no caching,
//! no counters, no mutation of the inputs. The engine calls these once per
//! reload, after all fetches for that reload have landed.

use crate::{
    core::{
        money::Money,
        records::{Donation, Expense},
    },
    errors::{Error, Result},
};
use serde::Serialize;

/// Totals and counts derived from one set of donations and expenses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FinancialSummary {
    /// Sum of all donation amounts
    pub total_donations: Money,
    /// Sum of all expense amounts
    pub total_expenses: Money,
    /// `total_donations - total_expenses`; negative when in deficit
    pub remaining_balance: Money,
    /// Number of live donation records
    pub donation_count: usize,
    /// Number of live expense records
    pub expense_count: usize,
}

/// Whether the fund currently covers its expenses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum BalanceStatus {
    /// Remaining balance is zero or positive
    Surplus,
    /// Expenses exceed donations
    Deficit,
}

impl BalanceStatus {
    /// Label shown next to the balance.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Surplus => "Surplus",
            Self::Deficit => "Deficit",
        }
    }
}

impl FinancialSummary {
    /// Surplus or deficit, based on the sign of the remaining balance.
    #[must_use]
    pub const fn balance_status(&self) -> BalanceStatus {
        if self.remaining_balance.is_negative() {
            BalanceStatus::Deficit
        } else {
            BalanceStatus::Surplus
        }
    }
}

/// Computes totals, balance and counts for the given record lists.
///
/// # Errors
/// [`Error::AmountOverflow`] if a total does not fit in [`Money`].
pub fn compute_summary(donations: &[Donation], expenses: &[Expense]) -> Result<FinancialSummary> {
    let total_donations = Money::checked_sum(donations.iter().map(|d| d.amount)).ok_or(
        Error::AmountOverflow {
            context: "total donations",
        },
    )?;
    let total_expenses = Money::checked_sum(expenses.iter().map(|e| e.amount)).ok_or(
        Error::AmountOverflow {
            context: "total expenses",
        },
    )?;
    let remaining_balance =
        total_donations
            .checked_sub(total_expenses)
            .ok_or(Error::AmountOverflow {
                context: "remaining balance",
            })?;

    Ok(FinancialSummary {
        total_donations,
        total_expenses,
        remaining_balance,
        donation_count: donations.len(),
        expense_count: expenses.len(),
    })
}

/// Unclamped `total / goal`, or `None` when there is no positive goal.
#[must_use]
pub fn goal_ratio(total_donations: Money, fundraising_goal: Money) -> Option<f64> {
    if !fundraising_goal.is_positive() {
        return None;
    }
    // Minor-unit counts are far below 2^53 for any realistic ledger
    #[allow(clippy::cast_precision_loss)]
    let ratio = total_donations.minor() as f64 / fundraising_goal.minor() as f64;
    Some(ratio)
}

/// Goal progress as a display percentage clamped to `[0, 100]`.
///
/// A goal of zero (or less) means "no goal" and yields 0, never an error or an
/// infinite value.
#[must_use]
pub fn compute_goal_progress(total_donations: Money, fundraising_goal: Money) -> f64 {
    goal_ratio(total_donations, fundraising_goal)
        .map_or(0.0, |ratio| (ratio * 100.0).clamp(0.0, 100.0))
}

/// How much is still needed to reach the goal, never negative.
#[must_use]
pub fn remaining_to_goal(total_donations: Money, fundraising_goal: Money) -> Money {
    total_donations.shortfall_to(fundraising_goal)
}

/// Goal figures for the dashboard.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GoalProgress {
    /// The fundraising target
    pub goal: Money,
    /// Clamped percentage for progress bars
    pub percent: f64,
    /// Unclamped `total / goal`; above 1.0 once the goal is exceeded
    pub ratio: f64,
    /// `max(0, goal - total)`
    pub remaining: Money,
}

impl GoalProgress {
    /// Builds goal figures, or `None` when no positive goal is set.
    #[must_use]
    pub fn new(total_donations: Money, fundraising_goal: Money) -> Option<Self> {
        let ratio = goal_ratio(total_donations, fundraising_goal)?;
        Some(Self {
            goal: fundraising_goal,
            percent: compute_goal_progress(total_donations, fundraising_goal),
            ratio,
            remaining: remaining_to_goal(total_donations, fundraising_goal),
        })
    }

    /// True once donations have met or exceeded the goal.
    #[must_use]
    pub fn is_reached(&self) -> bool {
        self.remaining == Money::ZERO
    }
}
