//! Festival settings and manual refresh commands.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            Context,
            commands::{parse_date_arg, session::admin_check},
            render,
        },
        core::{money::Money, records::SettingsInput},
        errors::Result,
    };

    /// Updates the festival details and fundraising goal.
    ///
    /// Fields you leave out keep their current value, or the configured defaults
    /// if the festival has not been set up yet.
    #[allow(clippy::too_many_arguments)]
    #[poise::command(slash_command, check = "admin_check")]
    pub async fn settings(
        ctx: Context<'_>,
        #[description = "Festival name"] name: Option<String>,
        #[description = "Festival year"] year: Option<i32>,
        #[description = "Venue"] location: Option<String>,
        #[description = "Public description"] description: Option<String>,
        #[description = "First day as YYYY-MM-DD"] start_date: Option<String>,
        #[description = "Last day as YYYY-MM-DD"] end_date: Option<String>,
        #[description = "Fundraising goal in rupees (0 for no goal)"] goal: Option<f64>,
    ) -> Result<()> {
        let data = ctx.data();
        let current = match data
            .engine
            .snapshot()
            .await
            .and_then(|snapshot| snapshot.settings.as_ref().map(SettingsInput::from))
        {
            Some(current) => current,
            None => data
                .config
                .festival
                .to_settings_input(chrono::Local::now().date_naive())?,
        };

        let input = SettingsInput {
            festival_name: name.unwrap_or(current.festival_name),
            festival_year: year.unwrap_or(current.festival_year),
            location: location.unwrap_or(current.location),
            description: description.unwrap_or(current.description),
            start_date: match start_date.as_deref() {
                Some(raw) => parse_date_arg("start_date", Some(raw))?,
                None => current.start_date,
            },
            end_date: match end_date.as_deref() {
                Some(raw) => parse_date_arg("end_date", Some(raw))?,
                None => current.end_date,
            },
            fundraising_goal: goal.map_or(Ok(current.fundraising_goal), Money::non_negative)?,
        };

        let saved = data.engine.save_settings(input).await?;
        ctx.send(
            poise::CreateReply::default()
                .content("✅ Festival settings saved.")
                .embed(render::festival_embed(&saved)),
        )
        .await?;
        Ok(())
    }

    /// Reloads the ledger from the database now.
    #[poise::command(slash_command, ephemeral, check = "admin_check")]
    pub async fn refresh(ctx: Context<'_>) -> Result<()> {
        ctx.data().refresh.request_refresh();
        ctx.say("🔄 Refresh requested.").await?;
        Ok(())
    }
}

pub use inner::*;
