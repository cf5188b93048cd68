use anyhow::Result;
use movie_catalog::{build_router, create_app_state, init_tracing, AppConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // ---
    // A missing .env file is normal outside local development.
    dotenvy::dotenv().ok();

    init_tracing();
    info!("Starting Movie Catalog API v{}...", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::from_env()?;
    let app = build_router(create_app_state(&config).await?);

    let endpoint = config.server.bind_addr.clone();
    info!("Starting at endpoint:{}", endpoint);

    let listener = tokio::net::TcpListener::bind(&endpoint).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    // ---
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
