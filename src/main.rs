use color_eyre::eyre::Result;
use cumplebot_api::config::ApiConfig;
use cumplebot_db::{create_pool, schema::initialize_database};
use cumplebot_discord_bot::config::BotConfig;
use dotenv::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Initialize logging; RUST_LOG wins over LOG_LEVEL
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()))
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting cumplebot");

    // Load configuration
    let bot_config = BotConfig::from_env()?;
    let api_config = ApiConfig::from_env()?;

    // Create database connection pool
    let db_pool = create_pool(&bot_config.database_url).await?;

    // Initialize database schema
    initialize_database(&db_pool).await?;

    // Liveness endpoint runs alongside the bot
    tokio::spawn(async move {
        if let Err(e) = cumplebot_api::start_server(api_config).await {
            error!("Liveness endpoint stopped: {}", e);
        }
    });

    // Start the Discord bot
    cumplebot_discord_bot::start_bot(bot_config, db_pool).await?;
    info!("Discord bot shut down gracefully");

    Ok(())
}
