use anyhow::Result;
use tracing_subscriber::{self, EnvFilter};

use docsight_api::config::ServerConfig;
use docsight_api::create_router;
use docsight_api::handlers::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config = ServerConfig::from_env();
    tracing::info!("Starting docsight API on {}", config.addr);

    let addr = config.addr.clone();
    let state = AppState::from_config(config).await.inspect_err(|e| {
        tracing::error!("Failed to initialize server state: {e:#}");
    })?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("docsight API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
    tracing::info!("Shutdown signal received");
}
