//! Expense business logic - create, list, edit and delete expenses.

use crate::{
    core::records::{Expense, ExpenseInput},
    entities::{self, expense},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{IntoActiveModel, QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Retrieves all expenses, newest expense date first.
pub async fn list_expenses(db: &DatabaseConnection) -> Result<Vec<Expense>> {
    let models = entities::Expense::find()
        .order_by_desc(expense::Column::ExpenseDate)
        .order_by_desc(expense::Column::CreatedAt)
        .all(db)
        .await?;
    debug!("Fetched {} expense rows", models.len());
    models.into_iter().map(Expense::try_from).collect()
}

/// Finds an expense by id, returning None if it does not exist.
pub async fn get_expense_by_id(db: &DatabaseConnection, id: &str) -> Result<Option<Expense>> {
    entities::Expense::find_by_id(id.to_string())
        .one(db)
        .await?
        .map(Expense::try_from)
        .transpose()
}

/// Validates and inserts a new expense with a fresh UUID.
#[instrument(skip(db, input), fields(amount = %input.amount))]
pub async fn create_expense(db: &DatabaseConnection, input: ExpenseInput) -> Result<Expense> {
    let input = input.validate()?;
    let now = Utc::now();

    let model = expense::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        title: Set(input.title),
        description: Set(input.description),
        amount_minor: Set(input.amount.minor()),
        category: Set(input.category.as_str().to_string()),
        vendor_name: Set(input.vendor_name),
        receipt_number: Set(input.receipt_number),
        expense_date: Set(input.expense_date),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let inserted = model.insert(db).await?;
    info!("Created expense {} ({})", inserted.id, inserted.title);
    Expense::try_from(inserted)
}

/// Replaces every editable field of an existing expense.
#[instrument(skip(db, input))]
pub async fn update_expense(
    db: &DatabaseConnection,
    id: &str,
    input: ExpenseInput,
) -> Result<Expense> {
    let input = input.validate()?;
    let txn = db.begin().await?;

    let existing = entities::Expense::find_by_id(id.to_string())
        .one(&txn)
        .await?
        .ok_or_else(|| Error::NotFound {
            kind: "expense",
            id: id.to_string(),
        })?;

    let mut model = existing.into_active_model();
    model.title = Set(input.title);
    model.description = Set(input.description);
    model.amount_minor = Set(input.amount.minor());
    model.category = Set(input.category.as_str().to_string());
    model.vendor_name = Set(input.vendor_name);
    model.receipt_number = Set(input.receipt_number);
    model.expense_date = Set(input.expense_date);
    model.updated_at = Set(Utc::now());

    let updated = model.update(&txn).await?;
    txn.commit().await?;

    info!("Updated expense {}", updated.id);
    Expense::try_from(updated)
}

/// Permanently deletes an expense.
#[instrument(skip(db))]
pub async fn delete_expense(db: &DatabaseConnection, id: &str) -> Result<()> {
    let result = entities::Expense::delete_by_id(id.to_string())
        .exec(db)
        .await?;
    if result.rows_affected == 0 {
        return Err(Error::NotFound {
            kind: "expense",
            id: id.to_string(),
        });
    }
    info!("Deleted expense {}", id);
    Ok(())
}
