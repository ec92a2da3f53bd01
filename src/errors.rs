// src/errors.rs
// DOCUMENTATION: Custom error types for the storage layer
// PURPOSE: Centralized error handling for both storage strategies

use thiserror::Error;

/// Application-specific error types
/// DOCUMENTATION: Comprehensive error enum for all possible failures
/// Database and file failures are logged where they occur and carried here as text
#[derive(Error, Debug)]
pub enum HbnbError {
    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Persistence error: {0}")]
    PersistenceError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<validator::ValidationErrors> for HbnbError {
    fn from(errors: validator::ValidationErrors) -> Self {
        HbnbError::ValidationError(errors.to_string())
    }
}

impl From<serde_json::Error> for HbnbError {
    fn from(err: serde_json::Error) -> Self {
        HbnbError::SerializationError(err.to_string())
    }
}

impl From<std::io::Error> for HbnbError {
    fn from(err: std::io::Error) -> Self {
        HbnbError::PersistenceError(err.to_string())
    }
}
