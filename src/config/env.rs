// src/config/env.rs
// DOCUMENTATION: Environment variable management
// PURPOSE: Load and validate configuration from .env files

use dotenv::dotenv;
use sqlx::mysql::MySqlConnectOptions;
use std::env;
use std::str::FromStr;

use crate::errors::HbnbError;

/// Which storage strategy backs the models
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    /// JSON file with an in-memory object map
    File,
    /// MySQL schema accessed through sqlx
    Db,
}

impl FromStr for StorageType {
    type Err = HbnbError;

    /// Only the literal `db` selects database mode; anything else means file mode
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "db" => Ok(StorageType::Db),
            _ => Ok(StorageType::File),
        }
    }
}

/// Application configuration loaded from environment variables
/// DOCUMENTATION: Centralizes all configuration in one struct
/// Load with Config::from_env() at application startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Storage strategy (HBNB_TYPE_STORAGE)
    pub storage_type: StorageType,

    /// MySQL user
    pub mysql_user: String,

    /// MySQL password
    pub mysql_password: String,

    /// MySQL host (may include :port)
    pub mysql_host: String,

    /// MySQL database name
    pub mysql_database: String,

    /// Environment: development, test, production
    /// "test" drops every table when the database storage reloads
    pub environment: String,

    /// JSON file used by file storage
    pub file_path: String,

    /// Log level: debug, info, warn, error
    pub log_level: String,

    /// Maximum connections in database pool
    pub db_max_connections: u32,

    /// Connection timeout in seconds
    pub db_connection_timeout: u64,
}

impl Config {
    /// Load configuration from environment variables
    /// DOCUMENTATION: Reads from .env or process environment
    /// Called once at application startup
    pub fn from_env() -> Self {
        dotenv().ok();

        Config {
            storage_type: env::var("HBNB_TYPE_STORAGE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(StorageType::File),

            mysql_user: env::var("HBNB_MYSQL_USER").unwrap_or_else(|_| "hbnb_dev".to_string()),

            mysql_password: env::var("HBNB_MYSQL_PWD")
                .unwrap_or_else(|_| "hbnb_dev_pwd".to_string()),

            mysql_host: env::var("HBNB_MYSQL_HOST").unwrap_or_else(|_| "localhost".to_string()),

            mysql_database: env::var("HBNB_MYSQL_DB")
                .unwrap_or_else(|_| "hbnb_dev_db".to_string()),

            environment: env::var("HBNB_ENV").unwrap_or_else(|_| "development".to_string()),

            file_path: env::var("HBNB_FILE_PATH").unwrap_or_else(|_| "file.json".to_string()),

            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),

            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),

            db_connection_timeout: env::var("DB_CONNECTION_TIMEOUT")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),
        }
    }

    /// MySQL connection options built from the HBNB_MYSQL_* settings
    /// DOCUMENTATION: Credentials are passed as fields, never spliced into a URL,
    /// so any character is allowed in the password
    pub fn connect_options(&self) -> MySqlConnectOptions {
        let (host, port) = split_host_port(&self.mysql_host);

        let mut options = MySqlConnectOptions::new()
            .host(host)
            .username(&self.mysql_user)
            .database(&self.mysql_database);

        if let Some(port) = port {
            options = options.port(port);
        }
        if !self.mysql_password.is_empty() {
            options = options.password(&self.mysql_password);
        }

        options
    }

    /// Whether tables are dropped on reload
    pub fn is_test_env(&self) -> bool {
        self.environment == "test"
    }

    /// Validate critical configuration
    /// DOCUMENTATION: Ensures application can start safely
    pub fn validate(&self) -> Result<(), HbnbError> {
        match self.storage_type {
            StorageType::Db => {
                if self.mysql_database.is_empty() {
                    return Err(HbnbError::ConfigError("HBNB_MYSQL_DB is required".to_string()));
                }
                if self.mysql_user.is_empty() {
                    log::warn!("HBNB_MYSQL_USER not configured - connecting anonymously");
                }
            }
            StorageType::File => {
                if self.file_path.is_empty() {
                    return Err(HbnbError::ConfigError(
                        "HBNB_FILE_PATH must not be empty".to_string(),
                    ));
                }
            }
        }

        Ok(())
    }
}

/// Split `host:port`; a missing or non-numeric port leaves the host whole
fn split_host_port(host: &str) -> (&str, Option<u16>) {
    match host.rsplit_once(':') {
        Some((name, port)) => match port.parse() {
            Ok(port) => (name, Some(port)),
            Err(_) => (host, None),
        },
        None => (host, None),
    }
}
