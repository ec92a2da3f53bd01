// src/db/user_repository.rs
// DOCUMENTATION: User database operations
// PURPOSE: Upsert and lookups for the users table

use crate::errors::HbnbError;
use crate::models::User;
use sqlx::{MySqlConnection, MySqlPool};

pub struct UserRepository;

impl UserRepository {
    pub async fn upsert(conn: &mut MySqlConnection, user: &User) -> Result<(), HbnbError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, created_at, updated_at, email, password, first_name, last_name)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                updated_at = VALUES(updated_at),
                email = VALUES(email),
                password = VALUES(password),
                first_name = VALUES(first_name),
                last_name = VALUES(last_name)
            "#,
        )
        .bind(&user.id)
        .bind(user.created_at)
        .bind(user.updated_at)
        .bind(&user.email)
        .bind(&user.password)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .execute(conn)
        .await
        .map_err(|e| {
            log::error!("Failed to save user {}: {}", user.id, e);
            HbnbError::DatabaseError(format!("Save user failed: {}", e))
        })?;

        Ok(())
    }

    pub async fn get_by_id(pool: &MySqlPool, id: &str) -> Result<Option<User>, HbnbError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, created_at, updated_at, email, password, first_name, last_name
            FROM users WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Database error fetching user {}: {}", id, e);
            HbnbError::DatabaseError(e.to_string())
        })
    }

    pub async fn list(pool: &MySqlPool) -> Result<Vec<User>, HbnbError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, created_at, updated_at, email, password, first_name, last_name
            FROM users ORDER BY created_at, id
            "#,
        )
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to list users: {}", e);
            HbnbError::DatabaseError(e.to_string())
        })
    }
}
