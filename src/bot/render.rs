//! Reply text and embeds built from a snapshot.
//!
//! The line builders are plain functions over records so they can be tested
//! without a Discord context.

use crate::{
    core::{
        display::{format_balance, format_date, format_inr, format_progress_bar},
        records::{Donation, Expense, FestivalSettings},
        summary::BalanceStatus,
    },
    engine::{LoadState, Snapshot},
};
use poise::serenity_prelude as serenity;
use std::fmt::Write;

/// Discord caps embed descriptions at 4096 characters; stay well under it.
const MAX_DESCRIPTION_CHARS: usize = 3800;

const SURPLUS_COLOR: u32 = 0x0015_803D;
const DEFICIT_COLOR: u32 = 0x00B9_1C1C;
const INFO_COLOR: u32 = 0x00EA_580C;

/// One donation as a list line.
#[must_use]
pub fn donation_line(donation: &Donation, with_id: bool) -> String {
    let style = donation.category.style();
    let mut line = format!(
        "{} **{}** · {} · {} · {}",
        style.icon,
        donation.display_name(),
        format_inr(donation.amount),
        donation.payment_method,
        format_date(donation.donation_date)
    );
    if with_id {
        let _ = write!(line, "\n`{}`", donation.id);
    }
    line
}

/// One expense as a list line.
#[must_use]
pub fn expense_line(expense: &Expense, with_id: bool) -> String {
    let style = expense.category.style();
    let mut line = format!(
        "{} **{}** · {} · {} · {}",
        style.icon,
        expense.title,
        format_inr(expense.amount),
        expense.category,
        format_date(expense.expense_date)
    );
    if let Some(vendor) = &expense.vendor_name {
        let _ = write!(line, " · {vendor}");
    }
    if with_id {
        let _ = write!(line, "\n`{}`", expense.id);
    }
    line
}

/// Embed colour for a donation, from its category badge.
#[must_use]
pub const fn donation_color(donation: &Donation) -> u32 {
    donation.category.style().color.rgb()
}

/// Embed colour for an expense, from its category badge.
#[must_use]
pub const fn expense_color(expense: &Expense) -> u32 {
    expense.category.style().color.rgb()
}

/// A single donation under a heading, tinted with its category colour.
#[must_use]
pub fn donation_embed(heading: &str, donation: &Donation) -> serenity::CreateEmbed {
    record_embed(heading, donation_line(donation, true), donation_color(donation))
}

/// A single expense under a heading, tinted with its category colour.
#[must_use]
pub fn expense_embed(heading: &str, expense: &Expense) -> serenity::CreateEmbed {
    record_embed(heading, expense_line(expense, true), expense_color(expense))
}

fn record_embed(heading: &str, body: String, color: u32) -> serenity::CreateEmbed {
    serenity::CreateEmbed::default()
        .title(heading)
        .description(body)
        .color(color)
}

/// Joins lines until the description budget runs out, then notes how many
/// were left off.
#[must_use]
pub fn join_lines(lines: &[String], total: usize) -> String {
    let mut out = String::new();
    let mut shown = 0;
    for line in lines {
        if out.len() + line.len() + 1 > MAX_DESCRIPTION_CHARS {
            break;
        }
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(line);
        shown += 1;
    }
    if total > shown {
        let _ = write!(out, "\n…and {} more", total - shown);
    }
    out
}

/// The notice shown when there is nothing to render yet, if any.
#[must_use]
pub fn unavailable_notice(state: &LoadState) -> Option<String> {
    match state {
        LoadState::Loading => Some("⏳ The ledger is still loading, try again shortly.".to_string()),
        LoadState::Unavailable(failure) => Some(format!(
            "⚠️ The ledger could not be loaded: {}",
            failure.message
        )),
        LoadState::Ready(_) | LoadState::Stale { .. } => None,
    }
}

/// Footer text describing how fresh the snapshot is.
#[must_use]
pub fn freshness_footer(state: &LoadState) -> String {
    match state {
        LoadState::Stale { snapshot, failure } => format!(
            "⚠️ Data may be out of date: showing {} (last refresh failed: {})",
            snapshot.loaded_at.format("%H:%M:%S UTC"),
            failure.message
        ),
        LoadState::Ready(snapshot) => {
            format!("Updated {}", snapshot.loaded_at.format("%H:%M:%S UTC"))
        }
        LoadState::Loading | LoadState::Unavailable(_) => String::new(),
    }
}

/// Festival heading, or a generic one when settings are missing.
#[must_use]
pub fn festival_title(settings: Option<&FestivalSettings>) -> String {
    settings.map_or_else(
        || "🪔 Festival Ledger".to_string(),
        |s| format!("🪔 {} {}", s.festival_name, s.festival_year),
    )
}

/// The financial summary embed.
#[must_use]
pub fn summary_embed(snapshot: &Snapshot, footer: String) -> serenity::CreateEmbed {
    let summary = &snapshot.summary;
    let color = match summary.balance_status() {
        BalanceStatus::Surplus => SURPLUS_COLOR,
        BalanceStatus::Deficit => DEFICIT_COLOR,
    };

    let mut embed = serenity::CreateEmbed::default()
        .title(festival_title(snapshot.settings.as_ref()))
        .color(color)
        .field(
            "Total Donations",
            format!(
                "{}\n{} donation{}",
                format_inr(summary.total_donations),
                summary.donation_count,
                plural(summary.donation_count)
            ),
            true,
        )
        .field(
            "Total Expenses",
            format!(
                "{}\n{} expense{}",
                format_inr(summary.total_expenses),
                summary.expense_count,
                plural(summary.expense_count)
            ),
            true,
        )
        .field(
            "Remaining Balance",
            format_balance(summary.remaining_balance),
            true,
        );

    if let Some(goal) = snapshot.goal_progress() {
        let remaining = if goal.is_reached() {
            "🎉 Goal reached!".to_string()
        } else {
            format!("{} to go", format_inr(goal.remaining))
        };
        embed = embed.field(
            format!("Fundraising Goal: {}", format_inr(goal.goal)),
            format!(
                "{}\n{}",
                format_progress_bar(goal.percent, Some(20)),
                remaining
            ),
            false,
        );
    }

    if footer.is_empty() {
        embed
    } else {
        embed.footer(serenity::CreateEmbedFooter::new(footer))
    }
}

/// The festival details embed.
#[must_use]
pub fn festival_embed(settings: &FestivalSettings) -> serenity::CreateEmbed {
    let mut embed = serenity::CreateEmbed::default()
        .title(festival_title(Some(settings)))
        .color(INFO_COLOR)
        .field(
            "Dates",
            format!(
                "{} – {}",
                format_date(settings.start_date),
                format_date(settings.end_date)
            ),
            true,
        );
    if !settings.location.is_empty() {
        embed = embed.field("Venue", settings.location.clone(), true);
    }
    if !settings.description.is_empty() {
        embed = embed.description(settings.description.clone());
    }
    embed
}

/// A list embed with a title and pre-built lines.
#[must_use]
pub fn list_embed(title: &str, lines: &[String], total: usize, footer: String) -> serenity::CreateEmbed {
    let description = if lines.is_empty() {
        "Nothing recorded yet.".to_string()
    } else {
        join_lines(lines, total)
    };
    let embed = serenity::CreateEmbed::default()
        .title(title)
        .color(INFO_COLOR)
        .description(description);
    if footer.is_empty() {
        embed
    } else {
        embed.footer(serenity::CreateEmbedFooter::new(footer))
    }
}

const fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}
