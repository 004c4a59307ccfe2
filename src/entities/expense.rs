//! Expense entity - One recorded outflow for festival costs.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Expense database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    /// Opaque unique identifier (UUID v4)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Short title, e.g. "Pandal lighting"
    pub title: String,
    /// Longer description
    pub description: Option<String>,
    /// Amount in minor units (paise)
    pub amount_minor: i64,
    /// One of the expense category display strings, e.g. `"Food/Prasadam"`
    pub category: String,
    /// Who was paid
    pub vendor_name: Option<String>,
    /// Receipt or invoice reference
    pub receipt_number: Option<String>,
    /// Date the expense was incurred
    pub expense_date: Date,
    /// When the row was inserted
    pub created_at: DateTimeUtc,
    /// When the row was last modified
    pub updated_at: DateTimeUtc,
}

/// Expenses have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
