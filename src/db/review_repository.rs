// src/db/review_repository.rs
// DOCUMENTATION: Review database operations
// PURPOSE: Handle CRUD operations for place reviews

use crate::errors::HbnbError;
use crate::models::Review;
use sqlx::{MySqlConnection, MySqlPool};

pub struct ReviewRepository;

impl ReviewRepository {
    /// Insert or update a review
    pub async fn upsert(conn: &mut MySqlConnection, review: &Review) -> Result<(), HbnbError> {
        sqlx::query(
            r#"
            INSERT INTO reviews (id, created_at, updated_at, place_id, user_id, text)
            VALUES (?, ?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                updated_at = VALUES(updated_at),
                place_id = VALUES(place_id),
                user_id = VALUES(user_id),
                text = VALUES(text)
            "#,
        )
        .bind(&review.id)
        .bind(review.created_at)
        .bind(review.updated_at)
        .bind(&review.place_id)
        .bind(&review.user_id)
        .bind(&review.text)
        .execute(conn)
        .await
        .map_err(|e| {
            log::error!("Failed to save review {}: {}", review.id, e);
            HbnbError::DatabaseError(format!("Save review failed: {}", e))
        })?;

        Ok(())
    }

    pub async fn get_by_id(pool: &MySqlPool, id: &str) -> Result<Option<Review>, HbnbError> {
        sqlx::query_as::<_, Review>(
            r#"
            SELECT id, created_at, updated_at, place_id, user_id, text
            FROM reviews WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Database error fetching review {}: {}", id, e);
            HbnbError::DatabaseError(e.to_string())
        })
    }

    pub async fn list(pool: &MySqlPool) -> Result<Vec<Review>, HbnbError> {
        sqlx::query_as::<_, Review>(
            r#"
            SELECT id, created_at, updated_at, place_id, user_id, text
            FROM reviews ORDER BY created_at, id
            "#,
        )
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to list reviews: {}", e);
            HbnbError::DatabaseError(e.to_string())
        })
    }

    /// Get reviews for a place
    /// DOCUMENTATION: Fetch all reviews for a specific place, oldest first
    pub async fn get_by_place(pool: &MySqlPool, place_id: &str) -> Result<Vec<Review>, HbnbError> {
        sqlx::query_as::<_, Review>(
            r#"
            SELECT id, created_at, updated_at, place_id, user_id, text
            FROM reviews
            WHERE place_id = ?
            ORDER BY created_at, id
            "#,
        )
        .bind(place_id)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to fetch reviews for place {}: {}", place_id, e);
            HbnbError::DatabaseError(format!("Fetch reviews failed: {}", e))
        })
    }
}
