//! Donation Discord commands - `/donation add`, `/donation edit`, `/donation delete`.
//!
//! All three require an admin session and write through the engine, which
//! reloads the snapshot once the write is stored.

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
            records::{DonationCategory, DonationInput, PaymentMethod},
        },
        errors::Result,
    };

    /// Parent command for managing donations.
    #[poise::command(
        slash_command,
        subcommands("donation_add", "donation_edit", "donation_delete"),
        check = "admin_check"
    )]
    pub async fn donation(ctx: Context<'_>) -> Result<()> {
        let help_text = "Donation management command. Available subcommands:\n\
            `/donation add` - Record a donation\n\
            `/donation edit` - Change a donation\n\
            `/donation delete` - Delete a donation";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Records a new donation.
    #[allow(clippy::too_many_arguments)]
    #[poise::command(slash_command, rename = "add", check = "admin_check")]
    pub async fn donation_add(
        ctx: Context<'_>,
        #[description = "Donor name (may be left as-is for anonymous donations)"] donor_name: String,
        #[description = "Amount in rupees (e.g., 501)"] amount: f64,
        #[description = "Individual, Family, Business or Anonymous"]
        #[autocomplete = "autocomplete::autocomplete_donation_category"]
        category: Option<String>,
        #[description = "Cash, Online, Check or Other"]
        #[autocomplete = "autocomplete::autocomplete_payment_method"]
        payment_method: Option<String>,
        #[description = "Hide the donor's name on the public dashboard"] anonymous: Option<bool>,
        #[description = "Donation date as YYYY-MM-DD (defaults to today)"] date: Option<String>,
        #[description = "Donor phone"] phone: Option<String>,
        #[description = "Donor email"] email: Option<String>,
        #[description = "Notes"] notes: Option<String>,
    ) -> Result<()> {
        let input = DonationInput {
            donor_name,
            donor_phone: phone,
            donor_email: email,
            amount: Money::positive(amount)?,
            category: category
                .as_deref()
                .map_or(Ok(DonationCategory::Individual), str::parse)?,
            is_anonymous: anonymous.unwrap_or(false),
            payment_method: payment_method
                .as_deref()
                .map_or(Ok(PaymentMethod::Cash), str::parse)?,
            notes,
            donation_date: parse_date_arg("donation_date", date.as_deref())?,
        };

        let created = ctx.data().engine.add_donation(input).await?;
        ctx.send(
            poise::CreateReply::default()
                .embed(render::donation_embed("✅ Donation recorded", &created)),
        )
        .await?;
        Ok(())
    }

    /// Changes an existing donation. Fields you leave out keep their value.
    #[allow(clippy::too_many_arguments)]
    #[poise::command(slash_command, rename = "edit", check = "admin_check")]
    pub async fn donation_edit(
        ctx: Context<'_>,
        #[description = "Donation to edit"]
        #[autocomplete = "autocomplete::autocomplete_donation_id"]
        id: String,
        #[description = "Donor name"] donor_name: Option<String>,
        #[description = "Amount in rupees"] amount: Option<f64>,
        #[description = "Category"]
        #[autocomplete = "autocomplete::autocomplete_donation_category"]
        category: Option<String>,
        #[description = "Payment method"]
        #[autocomplete = "autocomplete::autocomplete_payment_method"]
        payment_method: Option<String>,
        #[description = "Hide the donor's name on the public dashboard"] anonymous: Option<bool>,
        #[description = "Donation date as YYYY-MM-DD"] date: Option<String>,
        #[description = "Notes (send a single space to clear)"] notes: Option<String>,
    ) -> Result<()> {
        let engine = &ctx.data().engine;
        let current = DonationInput::from(&engine.current_donation(&id).await?);

        let input = DonationInput {
            donor_name: donor_name.unwrap_or(current.donor_name),
            amount: amount.map_or(Ok(current.amount), Money::positive)?,
            category: category
                .as_deref()
                .map_or(Ok(current.category), str::parse)?,
            payment_method: payment_method
                .as_deref()
                .map_or(Ok(current.payment_method), str::parse)?,
            is_anonymous: anonymous.unwrap_or(current.is_anonymous),
            donation_date: match date.as_deref() {
                Some(raw) => parse_date_arg("donation_date", Some(raw))?,
                None => current.donation_date,
            },
            notes: notes.or(current.notes),
            ..current
        };

        let updated = engine.edit_donation(&id, input).await?;
        ctx.send(
            poise::CreateReply::default()
                .embed(render::donation_embed("✏️ Donation updated", &updated)),
        )
        .await?;
        Ok(())
    }

    /// Permanently deletes a donation. Run once to review, then again with `confirm: True`.
    #[poise::command(slash_command, rename = "delete", check = "admin_check")]
    pub async fn donation_delete(
        ctx: Context<'_>,
        #[description = "Donation to delete"]
        #[autocomplete = "autocomplete::autocomplete_donation_id"]
        id: String,
        #[description = "Set to True to delete permanently"] confirm: Option<bool>,
    ) -> Result<()> {
        let engine = &ctx.data().engine;
        let existing = engine.current_donation(&id).await?;

        if !confirm.unwrap_or(false) {
            ctx.send(
                poise::CreateReply::default()
                    .content("Run `/donation delete` again with `confirm: True` to proceed.")
                    .embed(render::donation_embed(
                        "⚠️ This will permanently delete",
                        &existing,
                    )),
            )
            .await?;
            return Ok(());
        }

        engine.remove_donation(&id).await?;
        ctx.say(format!("🗑️ Deleted donation of {}.", format_inr(existing.amount)))
            .await?;
        Ok(())
    }
}

pub use inner::*;
