// src/storage/mod.rs
// DOCUMENTATION: Storage strategy interface
// PURPOSE: One contract for file-backed and database-backed persistence,
// chosen when the storage is constructed

pub mod db_storage;
pub mod file_storage;

pub use db_storage::DbStorage;
pub use file_storage::FileStorage;

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::{Config, StorageType};
use crate::errors::HbnbError;
use crate::models::{Amenity, City, Model, ModelKind, Place, Review};

/// Persistence strategy for every model
/// DOCUMENTATION: Objects are keyed `"<Class>.<id>"`; relationship queries return
/// entities ordered by creation time
#[async_trait]
pub trait Storage: Send + Sync {
    /// Every stored object, optionally restricted to one kind
    async fn all(&self, kind: Option<ModelKind>) -> Result<HashMap<String, Model>, HbnbError>;

    /// Register an object; it becomes durable on the next `save`
    async fn add(&self, model: Model) -> Result<(), HbnbError>;

    /// Flush registered objects
    async fn save(&self) -> Result<(), HbnbError>;

    /// Remove one object
    async fn delete(&self, kind: ModelKind, id: &str) -> Result<(), HbnbError>;

    /// Rebuild the storage from its backing medium
    async fn reload(&self) -> Result<(), HbnbError>;

    /// Release resources held by the storage
    async fn close(&self) -> Result<(), HbnbError>;

    /// One object by kind and id
    async fn get(&self, kind: ModelKind, id: &str) -> Result<Option<Model>, HbnbError>;

    /// Number of objects, optionally of one kind
    async fn count(&self, kind: Option<ModelKind>) -> Result<usize, HbnbError>;

    /// Cities whose `state_id` matches
    async fn cities_of(&self, state_id: &str) -> Result<Vec<City>, HbnbError>;

    /// Places whose `city_id` matches
    async fn places_of(&self, city_id: &str) -> Result<Vec<Place>, HbnbError>;

    /// Reviews whose `place_id` matches
    async fn reviews_of(&self, place_id: &str) -> Result<Vec<Review>, HbnbError>;

    /// Amenities linked to the place
    async fn amenities_of(&self, place: &Place) -> Result<Vec<Amenity>, HbnbError>;

    /// Link an amenity to the place
    async fn link_amenity(&self, place: &mut Place, amenity: &Amenity) -> Result<(), HbnbError>;
}

/// Build the configured storage and load its contents
/// DOCUMENTATION: `HBNB_TYPE_STORAGE=db` selects MySQL, anything else the JSON file
pub async fn init_storage(config: &Config) -> Result<Arc<dyn Storage>, HbnbError> {
    let storage: Arc<dyn Storage> = match config.storage_type {
        StorageType::Db => Arc::new(DbStorage::connect(config).await?),
        StorageType::File => Arc::new(FileStorage::open(&config.file_path)),
    };

    storage.reload().await?;
    Ok(storage)
}
