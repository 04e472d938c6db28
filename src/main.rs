use anyhow::Context;
use axum::Server;
use config::Config;
use std::net::SocketAddr;
use std::sync::Arc;

mod api;
mod config;
mod db;
mod errors;
mod logging;
mod services;

/// Result type for API
pub type Result<T> = std::result::Result<T, errors::ApiError>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;

    // Initialize logging
    logging::setup_logging(&config.log_dir, config.log_json)?;

    // Load the CSV database; the service cannot answer anything without it
    let db_service = db::DatabaseService::new(&config.database_file);
    if let Err(err) = db_service.connect().await {
        tracing::error!(
            "Failed to connect to the database at {}: {}",
            db_service.database_file().display(),
            err
        );
        anyhow::bail!("Failed to connect to the database.");
    }

    let state = api::AppState::new(
        db_service,
        services::AuthService::new(&config.api_key),
        Arc::new(services::TextPdfExtractor),
        config.assets_path.clone(),
    );

    // Setup API router and start server
    let app = api::initialize_router(state, config.max_upload_bytes, config.requests_per_second);
    let addr = SocketAddr::new(config.host, config.port);
    tracing::info!("Server starting on {}", addr);

    Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .context("Server terminated unexpectedly")?;

    Ok(())
}
