//! QR Menu Server: application entry point.

use anyhow::Context;
use qrmenu_server::{AppState, ServerConfig, build_app};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("qrmenu=info,tower_http=info")),
        )
        .json()
        .init();

    tracing::info!("Starting QR menu server...");

    let config = ServerConfig::from_env();
    if config.qr.base_url.is_empty() {
        tracing::warn!("BASE_UI_URL is not set; QR codes will encode relative paths");
    }

    let state = AppState::connect(&config)
        .await
        .context("failed to initialise the document store")?;

    let listener = tokio::net::TcpListener::bind(&config.http_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.http_addr))?;
    tracing::info!(addr = %config.http_addr, "HTTP server listening");

    axum::serve(listener, build_app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    tracing::info!("QR menu server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
