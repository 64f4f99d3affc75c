// vizor - Azure AI Vision image analysis demo server

use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};
use vizor::cli::Args;
use vizor::config::AppConfig;
use vizor::server::create_router;
use vizor::utils::logging;
use vizor::vision::VisionClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load configuration
    let mut config = AppConfig::load()?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting vizor v{}", env!("CARGO_PKG_VERSION"));

    // Phase 3: Build the Vision client when credentials are present.
    // The server still starts without them; the UI shows a setup message.
    let client = if config.vision.is_configured() {
        info!("Azure AI Vision endpoint: {}", config.vision.endpoint);
        Some(Arc::new(VisionClient::new(&config.vision)?))
    } else {
        warn!(
            "AZURE_VISION_ENDPOINT / AZURE_VISION_KEY not set; \
             analysis is disabled until credentials are provided"
        );
        None
    };

    // Phase 4: Build and start HTTP server
    let app = create_router(config.clone(), client)?;
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Phase 5: Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
