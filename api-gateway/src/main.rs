//! Creditmeter API Gateway
//!
//! Serves per-message credit usage for the current billing period.

use creditmeter_api_gateway::{app, GatewayConfig};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("creditmeter_api_gateway=info".parse()?)
                .add_directive("creditmeter_billing=info".parse()?),
        )
        .json()
        .init();

    let config = GatewayConfig::load()?;
    info!(?config, "Loaded configuration");

    let app = app(&config)?;

    let addr = config.bind_addr();
    info!("Creditmeter API Gateway starting on {}", addr);
    info!("Endpoints: /health, /usage, /metrics");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down Creditmeter API Gateway");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Received shutdown signal");
}
