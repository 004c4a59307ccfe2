//! Autocomplete handlers for Discord slash command parameters.
//!
//! Category and payment-method suggestions come from the fixed value sets,
//! with categories labelled by their icon;
//! record-id suggestions come from the engine's current snapshot, labelled so
//! admins can tell records apart while typing.

use crate::{
    bot::Context,
    core::{
        display::{CategoryStyle, donation_category_style, expense_category_style, format_inr},
        records::{DonationCategory, ExpenseCategory, PaymentMethod},
    },
};
use poise::serenity_prelude::AutocompleteChoice;

/// Discord shows at most this many suggestions.
const MAX_SUGGESTIONS: usize = 25;

fn matching(values: impl IntoIterator<Item = &'static str>, partial: &str) -> Vec<String> {
    let partial_lower = partial.to_lowercase();
    values
        .into_iter()
        .filter(|value| value.to_lowercase().contains(&partial_lower))
        .map(str::to_string)
        .collect()
}

fn category_label(value: &str, style: CategoryStyle) -> String {
    format!("{} {value}", style.icon)
}

fn labelled(values: Vec<String>, style: fn(&str) -> CategoryStyle) -> Vec<AutocompleteChoice> {
    values
        .into_iter()
        .map(|value| AutocompleteChoice::new(category_label(&value, style(&value)), value))
        .collect()
}

/// Suggests donation categories.
pub async fn autocomplete_donation_category(
    _ctx: Context<'_>,
    partial: &str,
) -> Vec<AutocompleteChoice> {
    labelled(
        matching(DonationCategory::ALL.iter().map(|c| c.as_str()), partial),
        donation_category_style,
    )
}

/// Suggests expense categories.
pub async fn autocomplete_expense_category(
    _ctx: Context<'_>,
    partial: &str,
) -> Vec<AutocompleteChoice> {
    labelled(
        matching(ExpenseCategory::ALL.iter().map(|c| c.as_str()), partial),
        expense_category_style,
    )
}

/// Suggests payment methods.
pub async fn autocomplete_payment_method(_ctx: Context<'_>, partial: &str) -> Vec<String> {
    matching(PaymentMethod::ALL.iter().map(|m| m.as_str()), partial)
}

/// Suggests donation ids, labelled with donor and amount.
///
/// Admins see real donor names here even for anonymous donations.
pub async fn autocomplete_donation_id(ctx: Context<'_>, partial: &str) -> Vec<AutocompleteChoice> {
    let Some(snapshot) = ctx.data().engine.snapshot().await else {
        return Vec::new();
    };
    let partial_lower = partial.to_lowercase();

    snapshot
        .donations
        .iter()
        .filter(|d| {
            d.id.starts_with(partial)
                || d.donor_name.to_lowercase().contains(&partial_lower)
        })
        .take(MAX_SUGGESTIONS)
        .map(|d| {
            AutocompleteChoice::new(
                format!("{} · {} · {}", d.donor_name, format_inr(d.amount), d.donation_date),
                d.id.clone(),
            )
        })
        .collect()
}

/// Suggests expense ids, labelled with title and amount.
pub async fn autocomplete_expense_id(ctx: Context<'_>, partial: &str) -> Vec<AutocompleteChoice> {
    let Some(snapshot) = ctx.data().engine.snapshot().await else {
        return Vec::new();
    };
    let partial_lower = partial.to_lowercase();

    snapshot
        .expenses
        .iter()
        .filter(|e| e.id.starts_with(partial) || e.title.to_lowercase().contains(&partial_lower))
        .take(MAX_SUGGESTIONS)
        .map(|e| {
            AutocompleteChoice::new(
                format!("{} · {} · {}", e.title, format_inr(e.amount), e.expense_date),
                e.id.clone(),
            )
        })
        .collect()
}
