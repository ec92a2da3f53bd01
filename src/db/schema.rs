// src/db/schema.rs
// DOCUMENTATION: Table definitions for database storage
// PURPOSE: Create and drop the MySQL schema in foreign-key order

use crate::errors::HbnbError;
use sqlx::MySqlPool;

/// DDL in dependency order: every table appears after the tables it references
/// DOCUMENTATION: Child rows cascade when their parent row is deleted
pub const CREATE_STATEMENTS: [(&str, &str); 7] = [
    (
        "states",
        r#"
        CREATE TABLE IF NOT EXISTS states (
            id VARCHAR(60) NOT NULL PRIMARY KEY,
            created_at DATETIME(6) NOT NULL,
            updated_at DATETIME(6) NOT NULL,
            name VARCHAR(128) NOT NULL
        ) ENGINE=InnoDB DEFAULT CHARSET=latin1
        "#,
    ),
    (
        "cities",
        r#"
        CREATE TABLE IF NOT EXISTS cities (
            id VARCHAR(60) NOT NULL PRIMARY KEY,
            created_at DATETIME(6) NOT NULL,
            updated_at DATETIME(6) NOT NULL,
            state_id VARCHAR(60) NOT NULL,
            name VARCHAR(128) NOT NULL,
            CONSTRAINT fk_cities_state FOREIGN KEY (state_id)
                REFERENCES states (id) ON DELETE CASCADE
        ) ENGINE=InnoDB
        "#,
    ),
    (
        "users",
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id VARCHAR(60) NOT NULL PRIMARY KEY,
            created_at DATETIME(6) NOT NULL,
            updated_at DATETIME(6) NOT NULL,
            email VARCHAR(128) NOT NULL,
            password VARCHAR(128) NOT NULL,
            first_name VARCHAR(128) NULL,
            last_name VARCHAR(128) NULL
        ) ENGINE=InnoDB
        "#,
    ),
    (
        "amenities",
        r#"
        CREATE TABLE IF NOT EXISTS amenities (
            id VARCHAR(60) NOT NULL PRIMARY KEY,
            created_at DATETIME(6) NOT NULL,
            updated_at DATETIME(6) NOT NULL,
            name VARCHAR(128) NOT NULL
        ) ENGINE=InnoDB
        "#,
    ),
    (
        "places",
        r#"
        CREATE TABLE IF NOT EXISTS places (
            id VARCHAR(60) NOT NULL PRIMARY KEY,
            created_at DATETIME(6) NOT NULL,
            updated_at DATETIME(6) NOT NULL,
            city_id VARCHAR(60) NOT NULL,
            user_id VARCHAR(60) NOT NULL,
            name VARCHAR(128) NOT NULL,
            description VARCHAR(1024) NULL,
            number_rooms INT NOT NULL DEFAULT 0,
            number_bathrooms INT NOT NULL DEFAULT 0,
            max_guest INT NOT NULL DEFAULT 0,
            price_by_night INT NOT NULL DEFAULT 0,
            latitude DOUBLE NULL,
            longitude DOUBLE NULL,
            CONSTRAINT fk_places_city FOREIGN KEY (city_id)
                REFERENCES cities (id) ON DELETE CASCADE,
            CONSTRAINT fk_places_user FOREIGN KEY (user_id)
                REFERENCES users (id) ON DELETE CASCADE
        ) ENGINE=InnoDB
        "#,
    ),
    (
        "place_amenity",
        r#"
        CREATE TABLE IF NOT EXISTS place_amenity (
            place_id VARCHAR(60) NOT NULL,
            amenity_id VARCHAR(60) NOT NULL,
            PRIMARY KEY (place_id, amenity_id),
            CONSTRAINT fk_place_amenity_place FOREIGN KEY (place_id)
                REFERENCES places (id) ON DELETE CASCADE,
            CONSTRAINT fk_place_amenity_amenity FOREIGN KEY (amenity_id)
                REFERENCES amenities (id) ON DELETE CASCADE
        ) ENGINE=InnoDB
        "#,
    ),
    (
        "reviews",
        r#"
        CREATE TABLE IF NOT EXISTS reviews (
            id VARCHAR(60) NOT NULL PRIMARY KEY,
            created_at DATETIME(6) NOT NULL,
            updated_at DATETIME(6) NOT NULL,
            place_id VARCHAR(60) NOT NULL,
            user_id VARCHAR(60) NOT NULL,
            text VARCHAR(1024) NOT NULL,
            CONSTRAINT fk_reviews_place FOREIGN KEY (place_id)
                REFERENCES places (id) ON DELETE CASCADE,
            CONSTRAINT fk_reviews_user FOREIGN KEY (user_id)
                REFERENCES users (id) ON DELETE CASCADE
        ) ENGINE=InnoDB
        "#,
    ),
];

/// Create every table that does not exist yet
pub async fn create_all(pool: &MySqlPool) -> Result<(), HbnbError> {
    for (table, ddl) in CREATE_STATEMENTS.iter() {
        sqlx::query(ddl).execute(pool).await.map_err(|e| {
            log::error!("Failed to create table {}: {}", table, e);
            HbnbError::DatabaseError(format!("Create table {} failed: {}", table, e))
        })?;
    }

    log::info!("Schema ready ({} tables)", CREATE_STATEMENTS.len());
    Ok(())
}

/// Drop every table, children first
pub async fn drop_all(pool: &MySqlPool) -> Result<(), HbnbError> {
    for (table, _) in CREATE_STATEMENTS.iter().rev() {
        sqlx::query(&format!("DROP TABLE IF EXISTS {}", table))
            .execute(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to drop table {}: {}", table, e);
                HbnbError::DatabaseError(format!("Drop table {} failed: {}", table, e))
            })?;
    }

    log::warn!("Dropped all tables");
    Ok(())
}
