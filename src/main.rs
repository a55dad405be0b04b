use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod services;
mod state;
mod types;
mod web;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sse_chat_relay=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("🚀 Starting SSE chat relay");

    // Load configuration
    let config = config::Config::from_env()?;

    // Create application state
    let app_state = state::AppState::new(config)?;

    // Start web server
    web::start_server(app_state).await?;

    Ok(())
}
