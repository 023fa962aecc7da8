//! FormDesk API server

use formdesk_api::{build_router, ApiConfig, ApiState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load config
    let config_path = std::env::var("CONFIG_PATH")
        .unwrap_or_else(|_| "/etc/formdesk/api.json".into());
    let loaded = ApiConfig::load(&config_path);
    let mut config = loaded.as_ref().ok().cloned().unwrap_or_default();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.log_level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("FormDesk API v{}", env!("CARGO_PKG_VERSION"));
    if let Err(e) = &loaded {
        tracing::warn!(path = %config_path, error = %e, "Config not found, using defaults");
    }
    if let Ok(port) = std::env::var("PORT") {
        config.apply_port(&port);
    }

    let app = build_router(ApiState::in_memory(), &config);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("FormDesk API listening on {}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
