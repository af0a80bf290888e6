//! AI Gateway - unified API over Azure OpenAI and DigitalOcean inference
//!
//! This is the main entry point for the gateway server.

use std::sync::Arc;

use ai_gateway::{config, routes, AppState, Config};
use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let loaded = Config::from_env();

    // Initialize tracing; RUST_LOG overrides LOG_LEVEL
    let level = loaded
        .as_ref()
        .map(|config| config.log_level)
        .unwrap_or(config::DEFAULT_LOG_LEVEL);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config::log_filter(level).into()),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting AI Gateway");

    // Configuration errors are fatal before any listener is bound
    let config = loaded.inspect_err(|e| error!(error = %e, "Invalid configuration"))?;
    info!(
        provider = %config.provider_kind(),
        endpoint = %config.provider.endpoint(),
        model = %config.provider.model(),
        "Configuration loaded successfully"
    );

    // Initialize metrics
    routes::metrics::init_metrics();
    info!("Metrics initialized");

    // Initialize application state
    let (host, port) = (config.host.clone(), config.port);
    let state = Arc::new(AppState::new(config)?);
    info!("Application state initialized");

    // Hostnames and IPv6 literals are resolved by the listener itself
    let listener = tokio::net::TcpListener::bind((host.as_str(), port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", host, port))?;
    let addr = listener.local_addr()?;

    // Build the router
    let app = routes::create_router(state);

    info!("Listening on {}", addr);
    info!("Docs: http://{}/docs", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("AI Gateway shutdown complete");
    Ok(())
}

/// Handle graceful shutdown signals
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating shutdown");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating shutdown");
        }
    }
}
