//! slirc-bot - Straylight IRC bot.
//!
//! Usage: `slirc-bot [config.toml]`

use slirc_bot::{Client, Config, PluginRegistry};
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

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    let config = Config::load(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;

    info!(
        host = %config.server.host,
        port = config.server.port,
        tls = config.server.tls,
        nick = %config.client.nick,
        "Starting slirc-bot"
    );

    let registry = PluginRegistry::from_config(&config);
    info!(count = registry.len(), plugins = ?registry.names(), "Plugins registered");

    let client = Client::new(config, registry);

    tokio::select! {
        result = client.run() => {
            result.map_err(|e| {
                error!(error = %e, "Client stopped");
                e
            })?;
            info!("Disconnected");
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    Ok(())
}

/// Resolves on ctrl-c, or SIGQUIT/SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let quit = unix_signal(tokio::signal::unix::SignalKind::quit(), "SIGQUIT");
    #[cfg(unix)]
    let terminate = unix_signal(tokio::signal::unix::SignalKind::terminate(), "SIGTERM");

    #[cfg(not(unix))]
    let quit = std::future::pending::<()>();
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = quit => {}
        _ = terminate => {}
    }
}

#[cfg(unix)]
async fn unix_signal(kind: tokio::signal::unix::SignalKind, name: &str) {
    match tokio::signal::unix::signal(kind) {
        Ok(mut stream) => {
            stream.recv().await;
            info!(signal = name, "Caught signal");
        }
        Err(e) => {
            error!(signal = name, error = %e, "Failed to install signal handler");
            std::future::pending::<()>().await;
        }
    }
}
