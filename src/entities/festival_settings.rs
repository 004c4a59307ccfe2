//! Festival settings entity - Singleton row holding festival metadata and the
//! fundraising goal. The row always lives under the fixed id
//! [`SETTINGS_ID`](crate::core::settings::SETTINGS_ID).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Festival settings database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "festival_settings")]
pub struct Model {
    /// Fixed singleton key
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    /// Festival name, e.g. "Vinayaka Chavithi"
    pub festival_name: String,
    /// Festival year
    pub festival_year: i32,
    /// Venue
    pub location: String,
    /// Public description shown on the dashboard
    pub description: String,
    /// First day of the festival
    pub start_date: Date,
    /// Last day of the festival
    pub end_date: Date,
    /// Fundraising target in minor units
    pub fundraising_goal_minor: i64,
    /// When the row was first inserted
    pub created_at: DateTimeUtc,
    /// When the row was last modified
    pub updated_at: DateTimeUtc,
}

/// `FestivalSettings` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
