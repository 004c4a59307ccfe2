use dotenvy::dotenv;
use festival_ledger::{
    auth::AdminAuth,
    bot::{self, BotData},
    config::{self, AdminConfig},
    core::settings,
    engine::{self, LedgerEngine},
    errors::{Error, Result},
    store::{LedgerStore, SeaOrmStore},
};
use std::{env, sync::Arc};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Load configuration
    let app_config = Arc::new(config::app::load_default_config()?);
    let admin_config = AdminConfig::from_env()?;

    // 4. Connect to the database and make sure the tables exist
    let db = config::database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    config::database::create_tables(&db).await?;
    info!("Database initialized successfully.");

    // 5. Seed festival settings on first run
    let today = chrono::Local::now().date_naive();
    if settings::seed_settings_if_missing(&db, app_config.festival.to_settings_input(today)?)
        .await?
    {
        info!("Festival settings seeded from configuration.");
    }

    // 6. Engine, initial load, and background refresh
    let store = Arc::new(SeaOrmStore::new(
        db,
        app_config.refresh.change_feed_capacity,
    ));
    let changes = store.subscribe_to_changes();
    let engine = Arc::new(LedgerEngine::new(
        store,
        app_config.refresh.fetch_timeout(),
    ));
    if let Err(e) = engine.reload().await {
        error!("Initial ledger load failed, will retry in the background: {}", e);
    }
    let refresh = engine::spawn_refresh(
        Arc::clone(&engine),
        changes,
        app_config.refresh.poll_interval(),
    );

    // 7. Run the bot
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {}", e))
        .map_err(Error::EnvVar)?;
    let auth = Arc::new(AdminAuth::new(admin_config));

    bot::run_bot(token, BotData::new(engine, auth, app_config, refresh)).await
}
