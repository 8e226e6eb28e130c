//! # pulsehubd — pulsehub daemon
//!
//! Composition root that wires the hub, the clock publisher and the HTTP
//! adapter together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialise `tracing` logging
//! - Spawn the broadcast hub loop and the clock publisher
//! - Build the axum router, injecting the hub handle
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no hub logic belongs here.

mod config;

use pulsehub_adapter_http_axum::state::AppState;
use pulsehub_app::hub::{Hub, HubHandle};
use pulsehub_app::ticker::ClockTicker;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Hub
    let (hub, handle) = Hub::new(config.hub.outbox_capacity);
    let hub_task = tokio::spawn(hub.run());

    // Publisher
    let ticker = ClockTicker::new(handle.clone(), config.tick_interval());
    let ticker_task = tokio::spawn(ticker.run());

    // HTTP
    let app = pulsehub_adapter_http_axum::router::build(AppState::new(handle.clone()));

    let bind_addr = config.bind_addr();
    let listener = match tokio::net::TcpListener::bind(&bind_addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(%err, %bind_addr, "failed to bind listener");
            handle.shutdown();
            return Err(err.into());
        }
    };
    tracing::info!("pulsehubd listening on http://{bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(handle))
        .await?;

    hub_task.await?;
    ticker_task.await?;
    tracing::info!("pulsehubd stopped");

    Ok(())
}

/// Resolve on SIGINT or SIGTERM, after asking the hub to stop.
///
/// Stopping the hub closes every subscriber outbox, so open event streams
/// end and the graceful shutdown can complete.
async fn shutdown_signal(hub: HubHandle) {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(%err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(%err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
    hub.shutdown();
}
