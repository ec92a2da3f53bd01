// src/db/place_repository.rs
// DOCUMENTATION: Place database operations
// PURPOSE: CRUD for places and maintenance of the place_amenity join table

use crate::errors::HbnbError;
use crate::models::Place;
use sqlx::{MySqlConnection, MySqlPool};
use std::collections::HashMap;

/// Column list shared by every place SELECT
const PLACE_COLUMNS: &str = r#"
    id, created_at, updated_at, city_id, user_id, name, description,
    number_rooms, number_bathrooms, max_guest, price_by_night,
    latitude, longitude
"#;

/// PlaceRepository: All database operations for places
pub struct PlaceRepository;

impl PlaceRepository {
    /// Insert or update a place along with its amenity links
    /// DOCUMENTATION: Links already present in place_amenity are left untouched
    pub async fn upsert(conn: &mut MySqlConnection, place: &Place) -> Result<(), HbnbError> {
        sqlx::query(
            r#"
            INSERT INTO places (
                id, created_at, updated_at, city_id, user_id, name, description,
                number_rooms, number_bathrooms, max_guest, price_by_night,
                latitude, longitude
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                updated_at = VALUES(updated_at),
                city_id = VALUES(city_id),
                user_id = VALUES(user_id),
                name = VALUES(name),
                description = VALUES(description),
                number_rooms = VALUES(number_rooms),
                number_bathrooms = VALUES(number_bathrooms),
                max_guest = VALUES(max_guest),
                price_by_night = VALUES(price_by_night),
                latitude = VALUES(latitude),
                longitude = VALUES(longitude)
            "#,
        )
        .bind(&place.id) // 1
        .bind(place.created_at) // 2
        .bind(place.updated_at) // 3
        .bind(&place.city_id) // 4
        .bind(&place.user_id) // 5
        .bind(&place.name) // 6
        .bind(&place.description) // 7
        .bind(place.number_rooms) // 8
        .bind(place.number_bathrooms) // 9
        .bind(place.max_guest) // 10
        .bind(place.price_by_night) // 11
        .bind(place.latitude) // 12
        .bind(place.longitude) // 13
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            log::error!("Failed to save place {}: {}", place.id, e);
            HbnbError::DatabaseError(format!("Save place failed: {}", e))
        })?;

        for amenity_id in &place.amenity_ids {
            Self::link_amenity(&mut *conn, &place.id, amenity_id).await?;
        }

        Ok(())
    }

    /// Add a row to place_amenity; an existing pair is left as is
    /// DOCUMENTATION: Foreign-key violations are reported, not downgraded to warnings
    pub async fn link_amenity(
        conn: &mut MySqlConnection,
        place_id: &str,
        amenity_id: &str,
    ) -> Result<(), HbnbError> {
        sqlx::query(
            r#"
            INSERT INTO place_amenity (place_id, amenity_id)
            VALUES (?, ?)
            ON DUPLICATE KEY UPDATE place_id = place_id
            "#,
        )
        .bind(place_id)
        .bind(amenity_id)
        .execute(conn)
        .await
        .map_err(|e| {
            log::error!(
                "Failed to link amenity {} to place {}: {}",
                amenity_id,
                place_id,
                e
            );
            HbnbError::DatabaseError(format!("Link amenity failed: {}", e))
        })?;

        Ok(())
    }

    /// Retrieve place by ID, amenity ids included
    pub async fn get_by_id(pool: &MySqlPool, id: &str) -> Result<Option<Place>, HbnbError> {
        let sql = format!("SELECT {} FROM places WHERE id = ?", PLACE_COLUMNS);
        let place = sqlx::query_as::<_, Place>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Database error fetching place {}: {}", id, e);
                HbnbError::DatabaseError(e.to_string())
            })?;

        match place {
            Some(mut place) => {
                place.amenity_ids = Self::amenity_ids(pool, &place.id).await?;
                Ok(Some(place))
            }
            None => Ok(None),
        }
    }

    /// All places, amenity ids included
    pub async fn list(pool: &MySqlPool) -> Result<Vec<Place>, HbnbError> {
        let sql = format!("SELECT {} FROM places ORDER BY created_at, id", PLACE_COLUMNS);
        let places = sqlx::query_as::<_, Place>(&sql)
            .fetch_all(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to list places: {}", e);
                HbnbError::DatabaseError(e.to_string())
            })?;

        Self::attach_amenity_ids(pool, places).await
    }

    /// Places listed in one city
    pub async fn get_by_city(pool: &MySqlPool, city_id: &str) -> Result<Vec<Place>, HbnbError> {
        let sql = format!(
            "SELECT {} FROM places WHERE city_id = ? ORDER BY created_at, id",
            PLACE_COLUMNS
        );
        let places = sqlx::query_as::<_, Place>(&sql)
            .bind(city_id)
            .fetch_all(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to fetch places for city {}: {}", city_id, e);
                HbnbError::DatabaseError(format!("Fetch places failed: {}", e))
            })?;

        Self::attach_amenity_ids(pool, places).await
    }

    /// Amenity ids linked to one place
    pub async fn amenity_ids(pool: &MySqlPool, place_id: &str) -> Result<Vec<String>, HbnbError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT amenity_id FROM place_amenity WHERE place_id = ? ORDER BY amenity_id",
        )
        .bind(place_id)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to fetch amenity links for place {}: {}", place_id, e);
            HbnbError::DatabaseError(e.to_string())
        })?;

        let mut ids: Vec<String> = rows.into_iter().map(|(id,)| id).collect();
        // Byte order, independent of the column collation
        ids.sort();
        Ok(ids)
    }

    /// Fill `amenity_ids` for a batch of places with a single query
    async fn attach_amenity_ids(
        pool: &MySqlPool,
        mut places: Vec<Place>,
    ) -> Result<Vec<Place>, HbnbError> {
        if places.is_empty() {
            return Ok(places);
        }

        let links: Vec<(String, String)> = sqlx::query_as(
            "SELECT place_id, amenity_id FROM place_amenity ORDER BY place_id, amenity_id",
        )
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to fetch amenity links: {}", e);
            HbnbError::DatabaseError(e.to_string())
        })?;

        let mut by_place: HashMap<String, Vec<String>> = HashMap::new();
        for (place_id, amenity_id) in links {
            by_place.entry(place_id).or_default().push(amenity_id);
        }

        for place in places.iter_mut() {
            let mut ids = by_place.remove(&place.id).unwrap_or_default();
            ids.sort();
            place.amenity_ids = ids;
        }

        Ok(places)
    }
}
