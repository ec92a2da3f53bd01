// src/models/place.rs
// DOCUMENTATION: Core data structure for rental listings
// PURPOSE: Place attributes plus review and amenity relationships

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::base::{new_id, now};
use super::{Amenity, Model, Review};
use crate::errors::HbnbError;
use crate::storage::Storage;

/// Represents a complete place record
/// DOCUMENTATION: This struct maps directly to the places table in MySQL
/// and to a `Place.<id>` entry in the JSON file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, Validate)]
pub struct Place {
    /// Unique identifier (UUID v4)
    pub id: String,

    /// When record was created
    pub created_at: NaiveDateTime,

    /// When record was last modified
    pub updated_at: NaiveDateTime,

    /// Owning city (required)
    #[validate(length(min = 1, max = 60))]
    pub city_id: String,

    /// Owning user (required)
    #[validate(length(min = 1, max = 60))]
    pub user_id: String,

    /// Place name - required field for all places
    #[validate(length(min = 1, max = 128))]
    pub name: String,

    /// Optional detailed description
    #[validate(length(max = 1024))]
    pub description: Option<String>,

    #[serde(default)]
    pub number_rooms: i32,

    #[serde(default)]
    pub number_bathrooms: i32,

    #[serde(default)]
    pub max_guest: i32,

    #[serde(default)]
    pub price_by_night: i32,

    /// Geographic coordinates
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    /// Ids of linked amenities, owned by this instance
    /// Loaded from place_amenity in database mode
    #[serde(default)]
    #[sqlx(skip)]
    pub amenity_ids: Vec<String>,
}

impl Place {
    /// New place with zeroed counters and no coordinates
    pub fn new(
        city_id: impl Into<String>,
        user_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        let stamp = now();
        Place {
            id: new_id(),
            created_at: stamp,
            updated_at: stamp,
            city_id: city_id.into(),
            user_id: user_id.into(),
            name: name.into(),
            description: None,
            number_rooms: 0,
            number_bathrooms: 0,
            max_guest: 0,
            price_by_night: 0,
            latitude: None,
            longitude: None,
            amenity_ids: Vec::new(),
        }
    }

    /// Record an amenity id; returns false when it was already linked
    /// Ids stay sorted, the same order place_amenity is read back in
    pub fn track_amenity(&mut self, amenity_id: &str) -> bool {
        match self
            .amenity_ids
            .binary_search_by(|id| id.as_str().cmp(amenity_id))
        {
            Ok(_) => false,
            Err(pos) => {
                self.amenity_ids.insert(pos, amenity_id.to_string());
                true
            }
        }
    }

    /// Reviews whose `place_id` is this place's id
    pub async fn reviews(&self, storage: &dyn Storage) -> Result<Vec<Review>, HbnbError> {
        storage.reviews_of(&self.id).await
    }

    /// Amenities linked to this place
    pub async fn amenities(&self, storage: &dyn Storage) -> Result<Vec<Amenity>, HbnbError> {
        storage.amenities_of(self).await
    }

    /// Link an amenity to this place
    pub async fn link_amenity(
        &mut self,
        storage: &dyn Storage,
        amenity: &Amenity,
    ) -> Result<(), HbnbError> {
        storage.link_amenity(self, amenity).await
    }

    /// Assign an arbitrary stored object as an amenity
    /// DOCUMENTATION: Only `Model::Amenity` is linked; any other variant is ignored
    /// and reported through the `false` return value
    pub async fn set_amenity(
        &mut self,
        storage: &dyn Storage,
        value: &Model,
    ) -> Result<bool, HbnbError> {
        match value {
            Model::Amenity(amenity) => {
                self.link_amenity(storage, amenity).await?;
                Ok(true)
            }
            other => {
                log::debug!(
                    "Ignoring {} assigned as amenity of place {}",
                    other.key(),
                    self.id
                );
                Ok(false)
            }
        }
    }
}
