mod actor_framework;
mod app_system;
mod clients;
mod config;
mod domain;
mod error;
mod gateway;
mod http;
mod order_actor;
mod store;

#[cfg(test)]
mod mock_framework;

use std::sync::Arc;

use tracing::{error, info};

use crate::app_system::{setup_tracing, CheckoutSystem};
use crate::clients::CheckoutSettings;
use crate::config::AppConfig;
use crate::domain::Catalog;
use crate::gateway::RazorpayClient;
use crate::http::AppState;
use crate::store::OrderStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = AppConfig::from_env()?;
    info!(bind_addr = %config.bind_addr, orders = %config.orders_path.display(), "Starting notes checkout");

    let catalog = Catalog::load(config.catalog_path.as_deref()).await?;
    let gateway = RazorpayClient::new(&config.gateway)?;
    let settings = CheckoutSettings {
        currency: config.currency.clone(),
        venture: config.venture.clone(),
        signing_secret: config.gateway.key_secret.clone(),
    };

    let system = CheckoutSystem::start(
        OrderStore::new(&config.orders_path),
        catalog,
        Arc::new(gateway),
        settings,
    )
    .await?;

    let app = http::router(
        AppState::new(system.checkout_client.clone()),
        config.static_dir.as_deref(),
    );
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "Listening");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;
    if let Err(e) = &served {
        error!(error = %e, "Server error");
    }

    // Router (and its client clones) are gone once serve returns.
    system.shutdown().await?;
    served?;

    info!("Notes checkout stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
