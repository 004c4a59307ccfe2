//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables backing the ledger.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod donation;
pub mod expense;
pub mod festival_settings;

// Re-export specific types to avoid conflicts
pub use donation::{Column as DonationColumn, Entity as Donation, Model as DonationModel};
pub use expense::{Column as ExpenseColumn, Entity as Expense, Model as ExpenseModel};
pub use festival_settings::{
    Column as FestivalSettingsColumn, Entity as FestivalSettings, Model as FestivalSettingsModel,
};
