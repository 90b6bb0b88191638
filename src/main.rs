//! cmdgen - HTTP Server Entry Point
//!
//! Starts the HTTP server that exposes the command generation API.

use cmdgen::{api, config::Config};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cmdgen=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Loaded configuration: model={} base_url={} api_key_set={}",
        config.model,
        config.base_url,
        config.api_key.is_some()
    );

    api::serve(config).await?;

    Ok(())
}
