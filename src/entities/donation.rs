//! Donation entity - One recorded contribution toward the festival fund.
//!
//! Category and payment method are stored as their display strings; amounts are
//! stored as integer minor units in `amount_minor`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Donation database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "donations")]
pub struct Model {
    /// Opaque unique identifier (UUID v4)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Name of the donor; may be empty for anonymous donations
    pub donor_name: String,
    /// Optional contact phone number
    pub donor_phone: Option<String>,
    /// Optional contact email address
    pub donor_email: Option<String>,
    /// Amount in minor units (paise)
    pub amount_minor: i64,
    /// `"Individual"`, `"Family"`, `"Business"` or `"Anonymous"`
    pub category: String,
    /// Hide the donor's name in public listings
    pub is_anonymous: bool,
    /// `"Cash"`, `"Online"`, `"Check"` or `"Other"`
    pub payment_method: String,
    /// Free-text notes
    pub notes: Option<String>,
    /// Date the donation was received
    pub donation_date: Date,
    /// When the row was inserted
    pub created_at: DateTimeUtc,
    /// When the row was last modified
    pub updated_at: DateTimeUtc,
}

/// Donations have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
