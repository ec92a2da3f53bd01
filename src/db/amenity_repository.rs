// src/db/amenity_repository.rs
// DOCUMENTATION: Amenity database operations
// PURPOSE: CRUD plus the many-to-many side of place_amenity

use crate::errors::HbnbError;
use crate::models::Amenity;
use sqlx::{MySqlConnection, MySqlPool};

pub struct AmenityRepository;

impl AmenityRepository {
    pub async fn upsert(conn: &mut MySqlConnection, amenity: &Amenity) -> Result<(), HbnbError> {
        sqlx::query(
            r#"
            INSERT INTO amenities (id, created_at, updated_at, name)
            VALUES (?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                updated_at = VALUES(updated_at),
                name = VALUES(name)
            "#,
        )
        .bind(&amenity.id)
        .bind(amenity.created_at)
        .bind(amenity.updated_at)
        .bind(&amenity.name)
        .execute(conn)
        .await
        .map_err(|e| {
            log::error!("Failed to save amenity {}: {}", amenity.id, e);
            HbnbError::DatabaseError(format!("Save amenity failed: {}", e))
        })?;

        Ok(())
    }

    pub async fn get_by_id(pool: &MySqlPool, id: &str) -> Result<Option<Amenity>, HbnbError> {
        sqlx::query_as::<_, Amenity>(
            "SELECT id, created_at, updated_at, name FROM amenities WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Database error fetching amenity {}: {}", id, e);
            HbnbError::DatabaseError(e.to_string())
        })
    }

    pub async fn list(pool: &MySqlPool) -> Result<Vec<Amenity>, HbnbError> {
        sqlx::query_as::<_, Amenity>(
            "SELECT id, created_at, updated_at, name FROM amenities ORDER BY created_at, id",
        )
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to list amenities: {}", e);
            HbnbError::DatabaseError(e.to_string())
        })
    }

    /// Amenities linked to a place through place_amenity
    pub async fn get_by_place(
        pool: &MySqlPool,
        place_id: &str,
    ) -> Result<Vec<Amenity>, HbnbError> {
        sqlx::query_as::<_, Amenity>(
            r#"
            SELECT a.id, a.created_at, a.updated_at, a.name
            FROM amenities a
            INNER JOIN place_amenity pa ON pa.amenity_id = a.id
            WHERE pa.place_id = ?
            ORDER BY a.created_at, a.id
            "#,
        )
        .bind(place_id)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to fetch amenities for place {}: {}", place_id, e);
            HbnbError::DatabaseError(format!("Fetch amenities failed: {}", e))
        })
    }
}
