use std::sync::Arc;

use crate::infrastructure::bootstrap;
use crate::infrastructure::config::AppConfig;
use crate::interfaces::http;

pub async fn run() -> std::io::Result<()> {
    let _ = dotenvy::dotenv();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .try_init();

    let config = AppConfig::load().map_err(std::io::Error::other)?;
    let state = bootstrap::build_state(&config)
        .await
        .map_err(std::io::Error::other)?;

    tracing::info!(bind = %config.bind, port = config.port, "starting PromptVault");
    http::serve(Arc::new(state), &config).await
}
