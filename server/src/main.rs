use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gift_budget_server::backend::{create_router, initialize_backend};
use gift_budget_server::config::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Arc::new(AppConfig::load()?);
    let addr = config.socket_addr()?;

    let app_state = initialize_backend(config.clone()).await?;
    let router = create_router(app_state, &config.allowed_origin)?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Gift budget server listening on {}", addr);

    axum::serve(listener, router).await.context("Server error")?;
    Ok(())
}
