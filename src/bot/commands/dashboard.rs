//! Public dashboard commands - summary, donation and expense lists, festival info.
//!
//! These commands only read the engine's current snapshot; they never hit the
//! store directly.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, render},
        core::display::{PUBLIC_DONATION_LIMIT, PUBLIC_EXPENSE_LIMIT},
        engine::{LoadState, Snapshot},
        errors::Result,
    };
    use std::sync::Arc;

    /// Replies with the loading/unavailable notice, or returns the snapshot.
    async fn snapshot_or_notice(ctx: Context<'_>) -> Result<Option<(Arc<Snapshot>, LoadState)>> {
        let state = ctx.data().engine.state().await;
        if let Some(notice) = render::unavailable_notice(&state) {
            ctx.say(notice).await?;
            return Ok(None);
        }
        let snapshot = state.snapshot().cloned();
        Ok(snapshot.map(|snapshot| (snapshot, state)))
    }

    /// Shows total donations, total expenses, remaining balance and goal progress.
    #[poise::command(slash_command, prefix_command)]
    pub async fn summary(ctx: Context<'_>) -> Result<()> {
        let Some((snapshot, state)) = snapshot_or_notice(ctx).await? else {
            return Ok(());
        };
        let embed = render::summary_embed(&snapshot, render::freshness_footer(&state));
        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Lists recent donations.
    #[poise::command(slash_command, prefix_command)]
    pub async fn donations(
        ctx: Context<'_>,
        #[description = "Show every donation instead of the most recent"] all: Option<bool>,
    ) -> Result<()> {
        let Some((snapshot, state)) = snapshot_or_notice(ctx).await? else {
            return Ok(());
        };
        let shown = if all.unwrap_or(false) {
            snapshot.donations.as_slice()
        } else {
            snapshot.recent_donations(PUBLIC_DONATION_LIMIT)
        };
        let lines: Vec<String> = shown
            .iter()
            .map(|d| render::donation_line(d, false))
            .collect();

        let embed = render::list_embed(
            &format!("🙏 Donations ({})", snapshot.summary.donation_count),
            &lines,
            snapshot.donations.len(),
            render::freshness_footer(&state),
        );
        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Lists recent expenses.
    #[poise::command(slash_command, prefix_command)]
    pub async fn expenses(
        ctx: Context<'_>,
        #[description = "Show every expense instead of the most recent"] all: Option<bool>,
    ) -> Result<()> {
        let Some((snapshot, state)) = snapshot_or_notice(ctx).await? else {
            return Ok(());
        };
        let shown = if all.unwrap_or(false) {
            snapshot.expenses.as_slice()
        } else {
            snapshot.recent_expenses(PUBLIC_EXPENSE_LIMIT)
        };
        let lines: Vec<String> = shown
            .iter()
            .map(|e| render::expense_line(e, false))
            .collect();

        let embed = render::list_embed(
            &format!("🧾 Expenses ({})", snapshot.summary.expense_count),
            &lines,
            snapshot.expenses.len(),
            render::freshness_footer(&state),
        );
        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Shows the festival's dates, venue and description.
    #[poise::command(slash_command, prefix_command)]
    pub async fn festival(ctx: Context<'_>) -> Result<()> {
        let Some((snapshot, _)) = snapshot_or_notice(ctx).await? else {
            return Ok(());
        };
        match &snapshot.settings {
            Some(settings) => {
                ctx.send(poise::CreateReply::default().embed(render::festival_embed(settings)))
                    .await?;
            }
            None => {
                ctx.say("ℹ️ Festival details have not been set up yet.").await?;
            }
        }
        Ok(())
    }
}

pub use inner::*;
