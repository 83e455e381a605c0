//! # Stride Storefront API
//!
//! HTTP server binary: loads configuration, opens the database, builds
//! the route table, and serves.

use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;

use storefront_api::config::ApiConfig;
use storefront_api::routes::router;
use storefront_api::state::AppState;
use stride_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(true)
        .init();

    info!("Starting Stride storefront API...");

    // Load configuration
    let config = ApiConfig::load()?;
    info!(
        port = config.http_port,
        db_path = %config.database_path,
        page_size = config.page_size,
        "Configuration loaded"
    );

    // Connect to the database (runs migrations)
    let db = Database::new(DbConfig::new(&config.database_path)).await?;
    info!("Connected to SQLite");

    // Wire services and the route table
    let state = AppState::new(&db, &config);
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    info!(%addr, "Listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
