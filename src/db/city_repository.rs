// src/db/city_repository.rs
// DOCUMENTATION: City database operations
// PURPOSE: CRUD plus the State -> City relationship

use crate::errors::HbnbError;
use crate::models::City;
use sqlx::{MySqlConnection, MySqlPool};

pub struct CityRepository;

impl CityRepository {
    pub async fn upsert(conn: &mut MySqlConnection, city: &City) -> Result<(), HbnbError> {
        sqlx::query(
            r#"
            INSERT INTO cities (id, created_at, updated_at, state_id, name)
            VALUES (?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                updated_at = VALUES(updated_at),
                state_id = VALUES(state_id),
                name = VALUES(name)
            "#,
        )
        .bind(&city.id)
        .bind(city.created_at)
        .bind(city.updated_at)
        .bind(&city.state_id)
        .bind(&city.name)
        .execute(conn)
        .await
        .map_err(|e| {
            log::error!("Failed to save city {}: {}", city.id, e);
            HbnbError::DatabaseError(format!("Save city failed: {}", e))
        })?;

        Ok(())
    }

    pub async fn get_by_id(pool: &MySqlPool, id: &str) -> Result<Option<City>, HbnbError> {
        sqlx::query_as::<_, City>(
            "SELECT id, created_at, updated_at, state_id, name FROM cities WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Database error fetching city {}: {}", id, e);
            HbnbError::DatabaseError(e.to_string())
        })
    }

    pub async fn list(pool: &MySqlPool) -> Result<Vec<City>, HbnbError> {
        sqlx::query_as::<_, City>(
            "SELECT id, created_at, updated_at, state_id, name FROM cities ORDER BY created_at, id",
        )
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to list cities: {}", e);
            HbnbError::DatabaseError(e.to_string())
        })
    }

    /// Cities of one state
    pub async fn get_by_state(pool: &MySqlPool, state_id: &str) -> Result<Vec<City>, HbnbError> {
        sqlx::query_as::<_, City>(
            r#"
            SELECT id, created_at, updated_at, state_id, name
            FROM cities
            WHERE state_id = ?
            ORDER BY created_at, id
            "#,
        )
        .bind(state_id)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to fetch cities for state {}: {}", state_id, e);
            HbnbError::DatabaseError(format!("Fetch cities failed: {}", e))
        })
    }
}
