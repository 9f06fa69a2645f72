use anyhow::Context;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

use hangman_persistence::DatabaseManager;
use hangman_server::{config::Config, create_routes, game_service::GameService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting Hangman server...");

    let config = Config::from_env().context("Failed to read configuration")?;

    // Initialize database connection and run migrations
    let database = DatabaseManager::connect(&config.database_url)
        .await
        .with_context(|| format!("Failed to open database '{}'", config.database_url))?;

    let game_service = Arc::new(GameService::from_database(&database, config.max_attempts));
    let seeded = game_service
        .initialize()
        .await
        .context("Failed to seed the word store")?;
    if seeded > 0 {
        info!("Word store was empty, inserted {} default words", seeded);
    }

    let routes = create_routes(game_service);

    info!(
        "Server starting on {}:{} (max attempts: {})",
        config.host, config.port, config.max_attempts
    );

    let (addr, server) = warp::serve(routes)
        .try_bind_with_graceful_shutdown((config.host, config.port), shutdown_signal())
        .context("Failed to bind server address")?;

    info!("Server started successfully on {}. Press Ctrl+C to stop.", addr);
    server.await;
    info!("Server shutdown complete.");

    Ok(())
}

/// Resolves on SIGINT or SIGTERM (Ctrl+C elsewhere)
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let signals = (
            signal::unix::signal(signal::unix::SignalKind::interrupt()),
            signal::unix::signal(signal::unix::SignalKind::terminate()),
        );

        match signals {
            (Ok(mut sigint), Ok(mut sigterm)) => {
                tokio::select! {
                    _ = sigint.recv() => {
                        info!("Received SIGINT, shutting down gracefully...");
                    }
                    _ = sigterm.recv() => {
                        info!("Received SIGTERM, shutting down gracefully...");
                    }
                }
                return;
            }
            _ => warn!("Failed to install unix signal handlers, falling back to Ctrl+C"),
        }
    }

    if let Err(err) = signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {}", err);
        std::future::pending::<()>().await;
    }
    info!("Received Ctrl+C, shutting down gracefully...");
}
