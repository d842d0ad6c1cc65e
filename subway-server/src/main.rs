use subway_server::config::{DEFAULT_LOG_FILTER, ServerConfig};
use subway_server::fare::FareCalculator;
use subway_server::store::MemoryStore;
use subway_server::web::{AppState, create_router};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = ServerConfig::from_env()?;

    // Build app state
    let state = AppState::new(MemoryStore::new(), FareCalculator::default());

    // Create router
    let app = create_router(state);

    // Bind and serve
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(addr = %config.addr, "subway server listening");
    info!("endpoints: /health, /stations, /lines, /lines/:id/sections, /paths");

    axum::serve(listener, app).await?;
    Ok(())
}
