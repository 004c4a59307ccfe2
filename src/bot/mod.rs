//! Bot layer - Discord-specific interface and command handlers
//!
//! This module exposes the ledger through Discord slash commands: the public
//! transparency view, admin sign-in, and admin record management. Commands read
//! from the engine's snapshot and write through the engine's admin actions.

/// Discord command implementations (dashboard, records, settings, session, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;
/// Shared reply formatting
pub mod render;

use crate::{
    auth::AdminAuth,
    config::AppConfig,
    engine::{LedgerEngine, RefreshHandle},
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Command context used throughout the bot layer.
pub type Context<'a> = poise::Context<'a, BotData, Error>;

/// Shared data available to all bot commands.
pub struct BotData {
    /// Cached ledger and admin write path
    pub engine: Arc<LedgerEngine>,
    /// Admin sessions
    pub auth: Arc<AdminAuth>,
    /// Loaded configuration
    pub config: Arc<AppConfig>,
    /// Background refresh; kept alive for as long as the bot runs
    pub refresh: RefreshHandle,
}

impl BotData {
    /// Bundles the shared state for the framework.
    #[must_use]
    pub const fn new(
        engine: Arc<LedgerEngine>,
        auth: Arc<AdminAuth>,
        config: Arc<AppConfig>,
        refresh: RefreshHandle,
    ) -> Self {
        Self {
            engine,
            auth,
            config,
            refresh,
        }
    }
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            if error.is_transient() {
                error!("Error in command `{}`: {:?}", ctx.command().name, error);
            } else {
                warn!("Command `{}` rejected: {}", ctx.command().name, error);
            }
            if let Err(e) = ctx.say(format!("❌ {error}")).await {
                error!("Failed to send error message: {}", e);
            }
        }
        poise::FrameworkError::CommandCheckFailed { ctx, .. } => {
            if let Err(e) = ctx
                .send(
                    poise::CreateReply::default()
                        .content("🔒 This command is for festival admins. Sign in with `/login` first.")
                        .ephemeral(true),
                )
                .await
            {
                error!("Failed to send check failure message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Connects to Discord and runs until the client stops.
#[instrument(skip(token, data))]
pub async fn run_bot(token: String, data: BotData) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all(),
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                info!("Registered {} commands", framework.options().commands.len());
                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged();

    let mut client = serenity::ClientBuilder::new(&token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {:?}", e))?;

    info!("Starting bot client...");
    client.start().await?;
    Ok(())
}
