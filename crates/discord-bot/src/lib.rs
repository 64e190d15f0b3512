use std::sync::Arc;

use cumplebot_core::registry::Registry;
use cumplebot_db::{DbPool, PgBirthdayStore};
use eyre::Result;
use serenity::{prelude::GatewayIntents, Client};
use tracing::info;

pub mod announcer;
pub mod client;
pub mod commands;
pub mod config;
pub mod deletion;
pub mod handlers;
pub mod roster;

use client::SerenityChatClient;

/// Start the Discord bot with the provided configuration and database connection.
///
/// Builds the chat client, registry, roster publisher and announcer, then
/// runs the gateway connection until it shuts down. The announcer starts
/// on the first ready event.
///
/// # Arguments
///
/// * `config` - The bot configuration containing token, guild and channel ids
/// * `db_pool` - A PostgreSQL connection pool backing the birthday registry
///
/// # Returns
///
/// * `Ok(())` if the bot shut down gracefully
/// * `Err` if the credential was rejected or the gateway failed
pub async fn start_bot(config: config::BotConfig, db_pool: DbPool) -> Result<()> {
    info!("Starting Discord bot");

    let chat = Arc::new(SerenityChatClient::connect(&config.token).await?);
    info!(bot = chat.bot_id().0, "Discord credential accepted");

    let registry = Registry::new(Arc::new(PgBirthdayStore::new(db_pool)))
        .with_policy(config.reregistration);
    let handler = handlers::Handler::new(handlers::HandlerContext::new(
        config.clone(),
        chat,
        registry,
    ));

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;
    let mut client = Client::builder(&config.token, intents)
        .event_handler(handler)
        .await?;

    // Start the client
    info!("Connecting to Discord...");
    client.start().await?;

    Ok(())
}
