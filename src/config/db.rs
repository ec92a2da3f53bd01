// src/config/db.rs
// DOCUMENTATION: Database connection pool initialization
// PURPOSE: Setup and manage MySQL connection pool

use crate::config::Config;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use std::time::Duration;

/// Initialize MySQL connection pool
/// DOCUMENTATION: Creates connection pool for database storage
/// Called once when the database strategy is constructed
pub async fn init_db_pool(config: &Config) -> Result<MySqlPool, sqlx::Error> {
    log::info!(
        "Initializing database pool: {}@{}/{}",
        config.mysql_user,
        config.mysql_host,
        config.mysql_database
    );

    connect_pool(
        config.connect_options(),
        config.db_max_connections,
        config.db_connection_timeout,
    )
    .await
}

/// Build a pool for explicit connection options
pub async fn connect_pool(
    options: MySqlConnectOptions,
    max_connections: u32,
    timeout_secs: u64,
) -> Result<MySqlPool, sqlx::Error> {
    let pool = MySqlPoolOptions::new()
        // Maximum concurrent connections
        .max_connections(max_connections)
        // Timeout waiting for connection from pool
        .acquire_timeout(Duration::from_secs(timeout_secs))
        // Connection idle timeout (5 minutes)
        .idle_timeout(Duration::from_secs(300))
        // Connection lifetime (30 minutes before recycle)
        .max_lifetime(Duration::from_secs(1800))
        .connect_with(options)
        .await?;

    // Verify connection works
    sqlx::query("SELECT 1").execute(&pool).await?;

    log::info!("Database pool initialized successfully");
    Ok(pool)
}
