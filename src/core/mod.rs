//! Core business logic - framework-agnostic records, money, aggregation and
//! store operations. Nothing in here knows about Discord.

/// Donation CRUD over `SeaORM`
pub mod donation;
/// Category styling and currency/date formatting
pub mod display;
/// Expense CRUD over `SeaORM`
pub mod expense;
/// Fixed-point money in minor units
pub mod money;
/// Typed records and validated write inputs
pub mod records;
/// Festival settings singleton
pub mod settings;
/// Pure aggregation: totals, balance, goal progress
pub mod summary;

pub use money::Money;
pub use records::{
    Donation, DonationCategory, DonationInput, Expense, ExpenseCategory, ExpenseInput,
    FestivalSettings, PaymentMethod, SettingsInput,
};
pub use summary::{FinancialSummary, GoalProgress, compute_goal_progress, compute_summary};
