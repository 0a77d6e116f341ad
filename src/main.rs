//! relayd - relay chat daemon.

use std::sync::Arc;

use relayd::{Config, Gateway, Registry};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // Load configuration; an explicitly named file must exist
    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(&path).map_err(|e| {
            error!(path = %path, error = %e, "Failed to load config");
            e
        })?,
        None => Config::load_default().map_err(|e| {
            error!(error = %e, "Failed to load default config");
            e
        })?,
    };

    info!(
        server = %config.server.name,
        address = %config.listen.address,
        pre_registration = ?config.server.pre_registration,
        "Starting relayd"
    );

    let registry = Arc::new(Registry::new());
    let gateway = Gateway::bind(&config, registry).await.map_err(|e| {
        error!(address = %config.listen.address, error = %e, "Failed to bind listener");
        e
    })?;

    gateway.run_until(shutdown_signal()).await?;

    info!("relayd stopped");
    Ok(())
}

/// Resolves on Ctrl-C. If the handler cannot be installed, never resolves.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received shutdown signal"),
        Err(e) => {
            error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    }
}
