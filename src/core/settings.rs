//! Festival settings singleton - read and upsert.
//!
//! There is never more than one settings row: every write targets the fixed
//! key [`SETTINGS_ID`], inserting it on first use and updating it afterwards.

use crate::{
    core::records::{FestivalSettings, SettingsInput},
    entities::{self, festival_settings},
    errors::Result,
};
use chrono::Utc;
use sea_orm::{IntoActiveModel, Set, TransactionTrait, prelude::*};
use tracing::{info, instrument};

/// Primary key of the one settings row.
pub const SETTINGS_ID: i32 = 1;

/// Reads the settings row, if one has been written.
pub async fn get_settings(db: &DatabaseConnection) -> Result<Option<FestivalSettings>> {
    entities::FestivalSettings::find_by_id(SETTINGS_ID)
        .one(db)
        .await?
        .map(FestivalSettings::try_from)
        .transpose()
}

/// Inserts or replaces the settings row.
#[instrument(skip(db, input), fields(festival = %input.festival_name))]
pub async fn upsert_settings(
    db: &DatabaseConnection,
    input: SettingsInput,
) -> Result<FestivalSettings> {
    let input = input.validate()?;
    let now = Utc::now();
    let txn = db.begin().await?;

    let existing = entities::FestivalSettings::find_by_id(SETTINGS_ID)
        .one(&txn)
        .await?;

    let saved = if let Some(existing) = existing {
        let mut model = existing.into_active_model();
        model.festival_name = Set(input.festival_name);
        model.festival_year = Set(input.festival_year);
        model.location = Set(input.location);
        model.description = Set(input.description);
        model.start_date = Set(input.start_date);
        model.end_date = Set(input.end_date);
        model.fundraising_goal_minor = Set(input.fundraising_goal.minor());
        model.updated_at = Set(now);
        model.update(&txn).await?
    } else {
        festival_settings::ActiveModel {
            id: Set(SETTINGS_ID),
            festival_name: Set(input.festival_name),
            festival_year: Set(input.festival_year),
            location: Set(input.location),
            description: Set(input.description),
            start_date: Set(input.start_date),
            end_date: Set(input.end_date),
            fundraising_goal_minor: Set(input.fundraising_goal.minor()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?
    };
    txn.commit().await?;

    info!(
        "Saved festival settings: {} {} (goal {})",
        saved.festival_name, saved.festival_year, saved.fundraising_goal_minor
    );
    FestivalSettings::try_from(saved)
}

/// Writes `defaults` only if no settings row exists yet.
///
/// Returns true when the defaults were written.
pub async fn seed_settings_if_missing(
    db: &DatabaseConnection,
    defaults: SettingsInput,
) -> Result<bool> {
    if get_settings(db).await?.is_some() {
        return Ok(false);
    }
    upsert_settings(db, defaults).await?;
    info!("Seeded default festival settings");
    Ok(true)
}
