use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use store_api::api::create_router;
use store_api::app::{AppConfig, AppState};
use store_api::infra::{PostgresGateway, PostgresProductRepository, PostgresUserRepository};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env()?;

    // The gateway is built exactly once and injected into the repositories;
    // migrations run before the server accepts requests.
    let gateway = Arc::new(
        PostgresGateway::connect(&config.database_url, config.postgres.clone()).await?,
    );
    gateway.run_migrations().await?;

    let user_repository = Arc::new(PostgresUserRepository::new(Arc::clone(&gateway)));
    let product_repository = Arc::new(PostgresProductRepository::new(Arc::clone(&gateway)));

    let app_state = Arc::new(AppState::new(
        user_repository,
        product_repository,
        Arc::clone(&gateway) as Arc<dyn store_api::domain::HealthProbe>,
    ));

    let router = create_router(app_state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Server listening on http://{}", config.bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down, closing database pool");
    gateway.close().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install ctrl-c handler");
    }
}
