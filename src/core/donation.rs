//! Donation business logic - create, list, edit and delete donations.
//!
//! Every write validates its input first, so nothing reaches the database that
//! would later be rejected when read back. Updates are in place (no versions)
//! and deletes are hard deletes.

use crate::{
    core::records::{Donation, DonationInput},
    entities::{self, donation},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{IntoActiveModel, QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Retrieves all donations, newest donation date first.
///
/// Donations sharing a date are ordered by creation time, newest first, so the
/// listing is stable between reloads.
pub async fn list_donations(db: &DatabaseConnection) -> Result<Vec<Donation>> {
    let models = entities::Donation::find()
        .order_by_desc(donation::Column::DonationDate)
        .order_by_desc(donation::Column::CreatedAt)
        .all(db)
        .await?;
    debug!("Fetched {} donation rows", models.len());
    models.into_iter().map(Donation::try_from).collect()
}

/// Finds a donation by id, returning None if it does not exist.
pub async fn get_donation_by_id(db: &DatabaseConnection, id: &str) -> Result<Option<Donation>> {
    entities::Donation::find_by_id(id.to_string())
        .one(db)
        .await?
        .map(Donation::try_from)
        .transpose()
}

/// Validates and inserts a new donation with a fresh UUID.
#[instrument(skip(db, input), fields(amount = %input.amount))]
pub async fn create_donation(db: &DatabaseConnection, input: DonationInput) -> Result<Donation> {
    let input = input.validate()?;
    let now = Utc::now();

    let model = donation::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        donor_name: Set(input.donor_name),
        donor_phone: Set(input.donor_phone),
        donor_email: Set(input.donor_email),
        amount_minor: Set(input.amount.minor()),
        category: Set(input.category.as_str().to_string()),
        is_anonymous: Set(input.is_anonymous),
        payment_method: Set(input.payment_method.as_str().to_string()),
        notes: Set(input.notes),
        donation_date: Set(input.donation_date),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let inserted = model.insert(db).await?;
    info!("Created donation {}", inserted.id);
    Donation::try_from(inserted)
}

/// Replaces every editable field of an existing donation.
///
/// Last write wins: there is no version check against concurrent edits.
#[instrument(skip(db, input))]
pub async fn update_donation(
    db: &DatabaseConnection,
    id: &str,
    input: DonationInput,
) -> Result<Donation> {
    let input = input.validate()?;
    let txn = db.begin().await?;

    let existing = entities::Donation::find_by_id(id.to_string())
        .one(&txn)
        .await?
        .ok_or_else(|| Error::NotFound {
            kind: "donation",
            id: id.to_string(),
        })?;

    let mut model = existing.into_active_model();
    model.donor_name = Set(input.donor_name);
    model.donor_phone = Set(input.donor_phone);
    model.donor_email = Set(input.donor_email);
    model.amount_minor = Set(input.amount.minor());
    model.category = Set(input.category.as_str().to_string());
    model.is_anonymous = Set(input.is_anonymous);
    model.payment_method = Set(input.payment_method.as_str().to_string());
    model.notes = Set(input.notes);
    model.donation_date = Set(input.donation_date);
    model.updated_at = Set(Utc::now());

    let updated = model.update(&txn).await?;
    txn.commit().await?;

    info!("Updated donation {}", updated.id);
    Donation::try_from(updated)
}

/// Permanently deletes a donation.
#[instrument(skip(db))]
pub async fn delete_donation(db: &DatabaseConnection, id: &str) -> Result<()> {
    let result = entities::Donation::delete_by_id(id.to_string())
        .exec(db)
        .await?;
    if result.rows_affected == 0 {
        return Err(Error::NotFound {
            kind: "donation",
            id: id.to_string(),
        });
    }
    info!("Deleted donation {}", id);
    Ok(())
}
