// src/models/city.rs
// DOCUMENTATION: City entity
// PURPOSE: Cities belong to a state and own places

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::base::{new_id, now};
use super::Place;
use crate::errors::HbnbError;
use crate::storage::Storage;

/// City belonging to a state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, Validate)]
pub struct City {
    pub id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,

    #[validate(length(min = 1, max = 60))]
    pub state_id: String,

    #[validate(length(min = 1, max = 128))]
    pub name: String,
}

impl City {
    pub fn new(state_id: impl Into<String>, name: impl Into<String>) -> Self {
        let stamp = now();
        City {
            id: new_id(),
            created_at: stamp,
            updated_at: stamp,
            state_id: state_id.into(),
            name: name.into(),
        }
    }

    /// Places listed in this city
    pub async fn places(&self, storage: &dyn Storage) -> Result<Vec<Place>, HbnbError> {
        storage.places_of(&self.id).await
    }
}
