use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use movie_picker::infrastructure::config::ConfigManager;
use movie_picker::infrastructure::logging::{init_logging_with_config, log_system_info};

#[tokio::main]
async fn main() -> Result<()> {
    let manager = match std::env::args_os().nth(1) {
        Some(path) => ConfigManager::with_path(PathBuf::from(path)),
        None => ConfigManager::new().context("Failed to locate configuration directory")?,
    };

    let config = manager.load_config().await?;
    init_logging_with_config(&config.logging)?;
    log_system_info();
    info!("Configuration loaded from {}", manager.config_path().display());

    movie_picker::run(config).await
}
