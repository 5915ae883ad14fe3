//! Doctor Records Portal - Web Server Binary
//!
//! # Usage
//!
//! ```bash
//! HUBSPOT_API_KEY=pat-... cargo run --bin doctor-portal
//! ```
//!
//! # Environment Variables
//!
//! * `HUBSPOT_API_KEY` - CRM private app token (required; may come from `.env`)
//! * `RUST_LOG` - Log filter, e.g. `info` or `interface_web=debug` (default: info)

use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use domain_doctor::HubSpotAdapter;
use interface_web::{config::AppConfig, create_router, AppState};

const DEFAULT_LOG_LEVEL: &str = "info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    init_tracing();

    let config = AppConfig::from_env().context("Failed to load configuration")?;

    let adapter = HubSpotAdapter::new(config.crm()).context("Failed to build CRM adapter")?;
    tracing::info!(base_url = %adapter.base_url(), "CRM adapter ready");

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .context("Invalid server address")?;
    let port = config.port;

    let state = AppState::new(Arc::new(adapter), config).context("Failed to compile templates")?;
    let app = create_router(state);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!(%addr, "Server running at http://localhost:{}", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
