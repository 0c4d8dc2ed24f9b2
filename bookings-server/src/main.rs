//! bookings-server: hotel booking website
//!
//! Serves the public room pages and reservation flow plus the admin area.
//! Runs against PostgreSQL, or a seeded in-memory store in development.

use std::net::SocketAddr;

use bookings_server::{AppState, Config, build_app, logger};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;
    logger::init_logger(&config.log_level, config.log_json, config.log_dir.as_deref())?;

    tracing::info!("Starting bookings-server (env: {})", config.environment);

    let http_addr = format!("0.0.0.0:{}", config.http_port);
    let state = AppState::from_config(config).await?;
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&http_addr).await?;
    tracing::info!("bookings-server HTTP listening on {http_addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("bookings-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
}
