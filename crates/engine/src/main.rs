use std::sync::Arc;
use anyhow::Result;
use tokio::sync::watch;
use tracing::{error, info};

use relay_engine::api;
use relay_engine::backend::{OllamaBackend, TextGenerator};
use relay_engine::config::Config;
use relay_engine::generation::GenerationService;

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    info!("Initializing Relay...");
    let config = Config::load();

    // The model must be resident before the listener accepts traffic
    let backend = OllamaBackend::new(&config.backend_url, &config.model);
    backend.warm_up().await?;
    let service = Arc::new(GenerationService::new(Arc::new(backend)));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let bind_addr = config.bind_addr.clone();
    let mut api_handle = tokio::spawn(async move {
        api::start_server(service, &bind_addr, shutdown_rx).await
    });

    // Wait for Ctrl+C, or bail out early if the server never came up
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            result?;
            info!("Received shutdown signal...");
            let _ = shutdown_tx.send(true);
            api_handle.await??;
        }
        result = &mut api_handle => {
            if let Ok(Err(e)) = &result {
                error!(error = %e, "API server crashed");
            }
            result??;
        }
    }

    info!("Relay shutdown complete.");
    Ok(())
}
