// src/db/repository.rs
// DOCUMENTATION: Table-agnostic database operations
// PURPOSE: Delete and count rows for any model kind

use crate::errors::HbnbError;
use crate::models::ModelKind;
use sqlx::MySqlPool;

/// Operations that only need the table name
pub struct ModelRepository;

impl ModelRepository {
    /// Delete one row by id
    /// DOCUMENTATION: Dependent rows go with it through ON DELETE CASCADE
    pub async fn delete_by_id(
        pool: &MySqlPool,
        kind: ModelKind,
        id: &str,
    ) -> Result<(), HbnbError> {
        let sql = format!("DELETE FROM {} WHERE id = ?", kind.table());
        let rows = sqlx::query(&sql)
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| {
                log::error!("Delete failed for {}: {}", kind.key(id), e);
                HbnbError::DatabaseError(e.to_string())
            })?
            .rows_affected();

        if rows == 0 {
            log::warn!("Delete of missing object: {}", kind.key(id));
            return Err(HbnbError::NotFound(kind.key(id)));
        }

        log::info!("Deleted {}", kind.key(id));
        Ok(())
    }

    /// Number of rows in the kind's table
    pub async fn count(pool: &MySqlPool, kind: ModelKind) -> Result<i64, HbnbError> {
        let sql = format!("SELECT COUNT(*) FROM {}", kind.table());
        let count: (i64,) = sqlx::query_as(&sql).fetch_one(pool).await.map_err(|e| {
            log::error!("Count query error on {}: {}", kind.table(), e);
            HbnbError::DatabaseError(e.to_string())
        })?;

        Ok(count.0)
    }
}
