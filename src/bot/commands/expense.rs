//! Expense Discord commands - `/expense add`, `/expense edit`, `/expense delete`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            Context,
            commands::{parse_date_arg, session::admin_check},
            handlers::autocomplete,
            render,
        },
        core::{
            display::format_inr,
            money::Money,
            records::{ExpenseCategory, ExpenseInput},
        },
        errors::Result,
    };

    /// Parent command for managing expenses.
    #[poise::command(
        slash_command,
        subcommands("expense_add", "expense_edit", "expense_delete"),
        check = "admin_check"
    )]
    pub async fn expense(ctx: Context<'_>) -> Result<()> {
        let help_text = "Expense management command. Available subcommands:\n\
            `/expense add` - Record an expense\n\
            `/expense edit` - Change an expense\n\
            `/expense delete` - Delete an expense";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Records a new expense.
    #[allow(clippy::too_many_arguments)]
    #[poise::command(slash_command, rename = "add", check = "admin_check")]
    pub async fn expense_add(
        ctx: Context<'_>,
        #[description = "What the money was spent on"] title: String,
        #[description = "Amount in rupees (e.g., 1200)"] amount: f64,
        #[description = "Expense category"]
        #[autocomplete = "autocomplete::autocomplete_expense_category"]
        category: String,
        #[description = "Expense date as YYYY-MM-DD (defaults to today)"] date: Option<String>,
        #[description = "Vendor"] vendor: Option<String>,
        #[description = "Receipt number"] receipt: Option<String>,
        #[description = "Longer description"] description: Option<String>,
    ) -> Result<()> {
        let input = ExpenseInput {
            title,
            description,
            amount: Money::positive(amount)?,
            category: category.parse::<ExpenseCategory>()?,
            vendor_name: vendor,
            receipt_number: receipt,
            expense_date: parse_date_arg("expense_date", date.as_deref())?,
        };

        let created = ctx.data().engine.add_expense(input).await?;
        ctx.send(
            poise::CreateReply::default()
                .embed(render::expense_embed("✅ Expense recorded", &created)),
        )
        .await?;
        Ok(())
    }

    /// Changes an existing expense. Fields you leave out keep their value.
    #[allow(clippy::too_many_arguments)]
    #[poise::command(slash_command, rename = "edit", check = "admin_check")]
    pub async fn expense_edit(
        ctx: Context<'_>,
        #[description = "Expense to edit"]
        #[autocomplete = "autocomplete::autocomplete_expense_id"]
        id: String,
        #[description = "Title"] title: Option<String>,
        #[description = "Amount in rupees"] amount: Option<f64>,
        #[description = "Expense category"]
        #[autocomplete = "autocomplete::autocomplete_expense_category"]
        category: Option<String>,
        #[description = "Expense date as YYYY-MM-DD"] date: Option<String>,
        #[description = "Vendor (send a single space to clear)"] vendor: Option<String>,
        #[description = "Receipt number (send a single space to clear)"] receipt: Option<String>,
        #[description = "Longer description (send a single space to clear)"] description: Option<
            String,
        >,
    ) -> Result<()> {
        let engine = &ctx.data().engine;
        let current = ExpenseInput::from(&engine.current_expense(&id).await?);

        let input = ExpenseInput {
            title: title.unwrap_or(current.title),
            description: description.or(current.description),
            amount: amount.map_or(Ok(current.amount), Money::positive)?,
            category: category.as_deref().map_or(Ok(current.category), str::parse)?,
            vendor_name: vendor.or(current.vendor_name),
            receipt_number: receipt.or(current.receipt_number),
            expense_date: match date.as_deref() {
                Some(raw) => parse_date_arg("expense_date", Some(raw))?,
                None => current.expense_date,
            },
        };

        let updated = engine.edit_expense(&id, input).await?;
        ctx.send(
            poise::CreateReply::default()
                .embed(render::expense_embed("✏️ Expense updated", &updated)),
        )
        .await?;
        Ok(())
    }

    /// Permanently deletes an expense. Run once to review, then again with `confirm: True`.
    #[poise::command(slash_command, rename = "delete", check = "admin_check")]
    pub async fn expense_delete(
        ctx: Context<'_>,
        #[description = "Expense to delete"]
        #[autocomplete = "autocomplete::autocomplete_expense_id"]
        id: String,
        #[description = "Set to True to delete permanently"] confirm: Option<bool>,
    ) -> Result<()> {
        let engine = &ctx.data().engine;
        let existing = engine.current_expense(&id).await?;

        if !confirm.unwrap_or(false) {
            ctx.send(
                poise::CreateReply::default()
                    .content("Run `/expense delete` again with `confirm: True` to proceed.")
                    .embed(render::expense_embed(
                        "⚠️ This will permanently delete",
                        &existing,
                    )),
            )
            .await?;
            return Ok(());
        }

        engine.remove_expense(&id).await?;
        ctx.say(format!(
            "🗑️ Deleted expense '{}' ({}).",
            existing.title,
            format_inr(existing.amount)
        ))
        .await?;
        Ok(())
    }
}

pub use inner::*;
