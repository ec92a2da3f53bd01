// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config and logging, open the configured storage, report its contents

use anyhow::Context;
use dotenv::dotenv;
use hbnb_storage::config::{Config, StorageType};
use hbnb_storage::models::ModelKind;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        let log_level = if !config.log_level.is_empty() {
            config.log_level.as_str()
        } else {
            "info,sqlx=warn"
        };
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();

    config.validate().context("invalid configuration")?;

    log::info!("Starting hbnb storage...");
    log::info!("Environment: {}", config.environment);
    match config.storage_type {
        StorageType::Db => log::info!(
            "Storage: MySQL {}@{}/{}",
            config.mysql_user,
            config.mysql_host,
            config.mysql_database
        ),
        StorageType::File => log::info!("Storage: file {}", config.file_path),
    }

    // 4. Open storage (creates the schema or reads the JSON file)
    let storage = hbnb_storage::init_storage(&config)
        .await
        .context("failed to open storage")?;

    // 5. Report what is stored
    for kind in ModelKind::ALL {
        let count = storage.count(Some(kind)).await?;
        log::info!("{:<8} {}", kind.class_name(), count);
    }
    log::info!("Total objects: {}", storage.count(None).await?);

    storage.close().await?;
    Ok(())
}
