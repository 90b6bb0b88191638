//! Router construction and server startup.

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::generate::generate_command;
use super::safety::command_filter;
use super::types::HealthResponse;
use crate::config::Config;
use crate::llm::{LlmClient, OpenAiClient};

/// Shared, read-only state for all requests.
pub struct AppState {
    pub config: Config,
    pub llm: Arc<dyn LlmClient>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/generate",
            post(generate_command).layer(middleware::from_fn(command_filter)),
        )
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Build the completion client from `config` and serve until shutdown.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let llm: Arc<dyn LlmClient> = Arc::new(OpenAiClient::from_config(&config));
    let addr = format!("{}:{}", config.host, config.port);
    let state = Arc::new(AppState { config, llm });

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running on {}", listener.local_addr()?);

    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
