// Tool-call relay API server
// Decision: Configuration is read once at startup; a missing API key aborts boot

use anyhow::{Context, Result};
use relay_api::api::{self, messages::AppState};
use relay_api::MessageService;
use relay_core::{OpenAiResponsesDriver, RelayConfig};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "relay_api=debug,relay_core=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("relay-api starting...");

    let config = RelayConfig::from_env().context("Failed to load configuration")?;
    tracing::info!(
        model = %config.model,
        base_url = %config.openai_base_url,
        unknown_tool_policy = ?config.unknown_tool_policy,
        tool_failure_policy = ?config.tool_failure_policy,
        "Configuration loaded"
    );

    let driver = Arc::new(OpenAiResponsesDriver::from_config(&config));
    let service = MessageService::from_config(&config, driver);
    tracing::info!(tools = ?service.registry().names(), "Tool registry initialized");

    let app = api::router(AppState::new(service));

    // Start HTTP server
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .context("Failed to bind to address")?;
    tracing::info!("HTTP server listening on {}", config.bind_addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
