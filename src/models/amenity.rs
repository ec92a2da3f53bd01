// src/models/amenity.rs
// DOCUMENTATION: Amenity entity
// PURPOSE: Amenities are linked to places through place_amenity

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::base::{new_id, now};

/// Amenity that places can offer (Wifi, Pool, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, Validate)]
pub struct Amenity {
    pub id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,

    #[validate(length(min = 1, max = 128))]
    pub name: String,
}

impl Amenity {
    pub fn new(name: impl Into<String>) -> Self {
        let stamp = now();
        Amenity {
            id: new_id(),
            created_at: stamp,
            updated_at: stamp,
            name: name.into(),
        }
    }
}
