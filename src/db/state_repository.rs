// src/db/state_repository.rs
// DOCUMENTATION: State database operations

use crate::errors::HbnbError;
use crate::models::State;
use sqlx::{MySqlConnection, MySqlPool};

pub struct StateRepository;

impl StateRepository {
    /// Insert or update a state
    pub async fn upsert(conn: &mut MySqlConnection, state: &State) -> Result<(), HbnbError> {
        sqlx::query(
            r#"
            INSERT INTO states (id, created_at, updated_at, name)
            VALUES (?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                updated_at = VALUES(updated_at),
                name = VALUES(name)
            "#,
        )
        .bind(&state.id)
        .bind(state.created_at)
        .bind(state.updated_at)
        .bind(&state.name)
        .execute(conn)
        .await
        .map_err(|e| {
            log::error!("Failed to save state {}: {}", state.id, e);
            HbnbError::DatabaseError(format!("Save state failed: {}", e))
        })?;

        Ok(())
    }

    pub async fn get_by_id(pool: &MySqlPool, id: &str) -> Result<Option<State>, HbnbError> {
        sqlx::query_as::<_, State>(
            "SELECT id, created_at, updated_at, name FROM states WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Database error fetching state {}: {}", id, e);
            HbnbError::DatabaseError(e.to_string())
        })
    }

    pub async fn list(pool: &MySqlPool) -> Result<Vec<State>, HbnbError> {
        sqlx::query_as::<_, State>(
            "SELECT id, created_at, updated_at, name FROM states ORDER BY created_at, id",
        )
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to list states: {}", e);
            HbnbError::DatabaseError(e.to_string())
        })
    }
}
