use anyhow::Result;
use tokio::sync::watch;
use std::sync::Arc;
use tracing::info;

use super::routes::create_router;
use crate::generation::GenerationService;

pub async fn start_server(
    service: Arc<GenerationService>,
    bind_addr: &str,
    shutdown_rx: watch::Receiver<bool>,
) -> Result<()> {
    let app = create_router()
        .with_state(service);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("Relay API server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_rx))
        .await?;

    Ok(())
}

async fn shutdown_signal(mut shutdown_rx: watch::Receiver<bool>) {
    // Wait for shutdown signal
    while !*shutdown_rx.borrow() {
        if shutdown_rx.changed().await.is_err() {
            break;
        }
    }
    info!("Shutting down API server...");
}
