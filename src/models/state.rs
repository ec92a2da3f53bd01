// src/models/state.rs
// DOCUMENTATION: State entity
// PURPOSE: Top of the location hierarchy; owns cities

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::base::{new_id, now};
use super::City;
use crate::errors::HbnbError;
use crate::storage::Storage;

/// Represents a state record
/// DOCUMENTATION: Maps to the `states` table (latin1) or a `State.<id>` file entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, Validate)]
pub struct State {
    pub id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,

    /// State name (required)
    #[validate(length(min = 1, max = 128))]
    pub name: String,
}

impl State {
    pub fn new(name: impl Into<String>) -> Self {
        let stamp = now();
        State {
            id: new_id(),
            created_at: stamp,
            updated_at: stamp,
            name: name.into(),
        }
    }

    /// Cities whose `state_id` is this state's id
    pub async fn cities(&self, storage: &dyn Storage) -> Result<Vec<City>, HbnbError> {
        storage.cities_of(&self.id).await
    }
}
