use dotenvy::dotenv;
use splitfare::{
    bot,
    config::{self, database},
    core::trip,
    errors::{Error, Result},
};
use std::{env, sync::Arc};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; variables may also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the trip configuration
    let app_config = Arc::new(config::load_app_configuration()?);
    info!("Loaded configuration for trip '{}'.", app_config.trip.name);

    // 4. Connect and make sure every table exists
    let db = database::create_connection()
        .await
        .inspect(|_| info!("Connected to database."))
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Seed members and budgeted expenses on first run
    trip::seed_from_config(&db, &app_config)
        .await
        .inspect(|seeded| info!(seeded, "Seed step finished."))
        .inspect_err(|e| error!("Failed to seed trip data: {}", e))?;

    // 6. Run the bot
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {}", e))
        .map_err(Error::EnvVar)?;

    bot::run_bot(token, app_config, db).await
}
