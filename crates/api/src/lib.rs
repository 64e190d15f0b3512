//! # Cumplebot API
//!
//! The liveness endpoint external uptime checks hit to see whether the process is
//! up. It exposes a single route, `GET /ping`, and nothing else.

/// Configuration module for the listener address
pub mod config;
/// Route definitions
pub mod routes;

use axum::Router;
use eyre::Result;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Build the application router.
pub fn router() -> Router {
    Router::new()
        .merge(routes::health::routes())
        .layer(TraceLayer::new_for_http())
}

/// Starts the liveness server and serves until the process exits.
///
/// # Arguments
///
/// * `config` - Listener host and port
///
/// # Example
///
/// ```no_run
/// # async fn example() -> eyre::Result<()> {
/// let config = cumplebot_api::config::ApiConfig::from_env()?;
/// cumplebot_api::start_server(config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig) -> Result<()> {
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Liveness endpoint listening on http://{}/ping", addr);
    axum::serve(listener, router()).await?;

    Ok(())
}
