//! Expensebook API Server
//!
//! Main entry point for the expense reporting service.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use expensebook_api::{AppState, create_router};
use expensebook_client::{CachedSource, RestSource};
use expensebook_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "expensebook=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;
    let timezone = config.report.tz()?;

    // Connect the expense backend, caching list results
    let rest = RestSource::from_config(&config.backend)?;
    info!(
        base_url = %rest.base_url(),
        timeout_secs = config.backend.timeout_secs,
        "Expense backend configured"
    );
    let source = CachedSource::from_config(rest, &config.report);
    info!(
        ttl_secs = config.report.cache_ttl_secs,
        capacity = config.report.cache_capacity,
        "List cache configured"
    );

    // Create application state
    let state = AppState::new(Arc::new(source), timezone);
    info!(timezone = %timezone, "Report time zone");

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
