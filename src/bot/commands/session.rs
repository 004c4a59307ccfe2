//! Admin session commands - login, logout and the admin overview.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, render},
        core::display::ADMIN_OVERVIEW_LIMIT,
        errors::{Error, Result},
    };

    /// Passes only for users with an active admin session.
    ///
    /// Used as a poise `check`; a `false` result is reported by the framework's
    /// error handler.
    pub async fn admin_check(ctx: Context<'_>) -> Result<bool> {
        let user_id = ctx.author().id.get();
        Ok(ctx.data().auth.current_user(user_id).await.is_some())
    }

    /// Signs in as a festival admin.
    #[poise::command(slash_command, ephemeral)]
    pub async fn login(
        ctx: Context<'_>,
        #[description = "Admin passphrase"] passphrase: String,
    ) -> Result<()> {
        let user_id = ctx.author().id.get();
        match ctx.data().auth.sign_in(user_id, &passphrase).await {
            Ok(_) => {
                ctx.say("✅ Signed in. Admin commands are now available; use `/logout` when done.")
                    .await?;
            }
            Err(Error::Unauthorized) => {
                ctx.say("❌ Sign-in failed.").await?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Ends your admin session.
    #[poise::command(slash_command, ephemeral)]
    pub async fn logout(ctx: Context<'_>) -> Result<()> {
        let user_id = ctx.author().id.get();
        if ctx.data().auth.sign_out(user_id).await {
            ctx.say("👋 Signed out.").await?;
        } else {
            ctx.say("ℹ️ You were not signed in.").await?;
        }
        Ok(())
    }

    /// Shows the latest donations and expenses with their ids.
    #[poise::command(slash_command, ephemeral, check = "admin_check")]
    pub async fn overview(ctx: Context<'_>) -> Result<()> {
        let state = ctx.data().engine.state().await;
        if let Some(notice) = render::unavailable_notice(&state) {
            ctx.say(notice).await?;
            return Ok(());
        }
        let Some(snapshot) = state.snapshot() else {
            return Ok(());
        };

        let donation_lines: Vec<String> = snapshot
            .recent_donations(ADMIN_OVERVIEW_LIMIT)
            .iter()
            .map(|d| render::donation_line(d, true))
            .collect();
        let expense_lines: Vec<String> = snapshot
            .recent_expenses(ADMIN_OVERVIEW_LIMIT)
            .iter()
            .map(|e| render::expense_line(e, true))
            .collect();

        let footer = render::freshness_footer(&state);
        let reply = poise::CreateReply::default()
            .embed(render::summary_embed(snapshot, footer.clone()))
            .embed(render::list_embed(
                "Recent Donations",
                &donation_lines,
                snapshot.donations.len(),
                footer.clone(),
            ))
            .embed(render::list_embed(
                "Recent Expenses",
                &expense_lines,
                snapshot.expenses.len(),
                footer,
            ));
        ctx.send(reply).await?;
        Ok(())
    }
}

pub use inner::*;
