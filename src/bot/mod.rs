//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for `SplitFare`, including all slash
//! commands, autocomplete handlers, shared bot context and the framework runner.

/// Discord command implementations (members, expenses, split, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::{
    config::AppConfig,
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tracing::{info, instrument};

/// Shared data available to all bot commands.
/// This structure holds the database connection and the loaded trip configuration.
pub struct BotData {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
    /// Trip configuration (name, suggested categories)
    pub config: Arc<AppConfig>,
}

impl BotData {
    /// Creates a new `BotData` instance with the given database connection and config.
    #[must_use]
    pub const fn new(database: DatabaseConnection, config: Arc<AppConfig>) -> Self {
        Self { database, config }
    }
}

pub use commands::*;
pub use handlers::*;

/// Every slash command the bot registers.
#[must_use]
pub fn all_commands() -> Vec<poise::Command<BotData, Error>> {
    vec![
        commands::member(),
        commands::budget(),
        commands::expense(),
        commands::split(),
        commands::reset(),
        commands::ping(),
        commands::help(),
    ]
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            let reply = if error.is_user_error() {
                tracing::warn!("Command `{}` rejected: {}", ctx.command().name, error);
                format!("❌ {error}")
            } else {
                tracing::error!("Error in command `{}`: {:?}", ctx.command().name, error);
                "❌ Something went wrong while handling that command.".to_string()
            };
            if let Err(e) = ctx.say(reply).await {
                tracing::error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                tracing::error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Builds the poise framework, connects to Discord and runs until the client stops.
#[instrument(skip(token, config, database))]
pub async fn run_bot(
    token: String,
    config: Arc<AppConfig>,
    database: DatabaseConnection,
) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: all_commands(),
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(BotData::new(database, config))
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::Client::builder(&token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| tracing::error!("Error creating client: {:?}", e))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| tracing::error!("Client error: {:?}", e))?;
    Ok(())
}
