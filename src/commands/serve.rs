use crate::config::{AppConfig, Settings};
use crate::handlers::create_router;
use anyhow::{Context, Result};
use colored::Colorize;
use tracing::info;

/// Execute the serve command
pub async fn execute(settings: Settings, config: AppConfig) -> Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let app = create_router(settings, config).await?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    println!("{} http://{}", "milecount listening on".green(), addr);
    info!("Health check: http://{}/health", addr);
    info!("Calculate endpoint: http://{}/calculate", addr);

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
