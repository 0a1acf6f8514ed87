//! Exa Spotlight server
//!
//! HTTP front end that forwards searches, similar-page lookups and questions
//! to Exa and renders the results as HTML fragments.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use spotlight_api::{app, AppConfig, AppState};
use spotlight_exa::ExaClient;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env
    if let Err(e) = dotenvy::dotenv() {
        // Not an error if the file doesn't exist
        if !e.not_found() {
            eprintln!("Warning: Failed to load .env: {}", e);
        }
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("info,spotlight_api=debug,spotlight_exa=debug")
            }),
        )
        .init();

    info!("Starting Exa Spotlight");

    // Missing credentials stop the process here, before anything is served
    let config = AppConfig::from_env().context("Failed to load configuration")?;
    let client = ExaClient::new(&config.exa).context("Failed to initialize Exa client")?;
    info!(
        "Exa client ready: base_url={}, timeout={:?}",
        config.exa.base_url, config.exa.timeout
    );

    let state = AppState::new(Arc::new(client));
    let router = app(state, &config.static_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
