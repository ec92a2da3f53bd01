// src/storage/file_storage.rs
// DOCUMENTATION: JSON file storage strategy
// PURPOSE: Keep every object in memory and persist the whole map to one file

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

use super::Storage;
use crate::errors::HbnbError;
use crate::models::{sort_by_creation, Amenity, City, Entity, Model, ModelKind, Place, Review};

/// File-backed storage
/// DOCUMENTATION: Objects live in a map keyed `"<Class>.<id>"`; `save` writes the
/// map to `path` and `reload` replaces the map with the file contents.
/// Relationships are resolved by scanning the map.
pub struct FileStorage {
    path: PathBuf,
    objects: RwLock<HashMap<String, Model>>,
}

impl FileStorage {
    /// Storage bound to a JSON file; nothing is read until `reload`
    pub fn open(path: impl AsRef<Path>) -> Self {
        FileStorage {
            path: path.as_ref().to_path_buf(),
            objects: RwLock::new(HashMap::new()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every stored object of type `T`, oldest first
    async fn objects_of<T: Entity>(&self) -> Vec<T> {
        let objects = self.objects.read().await;
        let mut items: Vec<T> = objects
            .values()
            .filter(|model| model.kind() == T::KIND)
            .cloned()
            .filter_map(T::from_model)
            .collect();
        sort_by_creation(&mut items);
        items
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn all(&self, kind: Option<ModelKind>) -> Result<HashMap<String, Model>, HbnbError> {
        let objects = self.objects.read().await;
        Ok(objects
            .iter()
            .filter(|(_, model)| kind.map_or(true, |k| model.kind() == k))
            .map(|(key, model)| (key.clone(), model.clone()))
            .collect())
    }

    async fn add(&self, model: Model) -> Result<(), HbnbError> {
        model.validate()?;

        let key = model.key();
        self.objects.write().await.insert(key.clone(), model);
        log::debug!("Registered {}", key);
        Ok(())
    }

    async fn save(&self) -> Result<(), HbnbError> {
        let objects = self.objects.read().await;
        // BTreeMap keeps the file stable between saves
        let ordered: BTreeMap<&String, &Model> = objects.iter().collect();
        let json = serde_json::to_string(&ordered)?;

        tokio::fs::write(&self.path, json).await.map_err(|e| {
            log::error!("Failed to write {}: {}", self.path.display(), e);
            HbnbError::PersistenceError(format!("Write {} failed: {}", self.path.display(), e))
        })?;

        log::info!("Saved {} objects to {}", objects.len(), self.path.display());
        Ok(())
    }

    async fn delete(&self, kind: ModelKind, id: &str) -> Result<(), HbnbError> {
        let key = kind.key(id);
        match self.objects.write().await.remove(&key) {
            Some(_) => {
                log::info!("Deleted {}", key);
                Ok(())
            }
            None => {
                log::warn!("Delete of missing object: {}", key);
                Err(HbnbError::NotFound(key))
            }
        }
    }

    async fn reload(&self) -> Result<(), HbnbError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No storage file at {}, keeping current objects", self.path.display());
                return Ok(());
            }
            Err(e) => {
                log::error!("Failed to read {}: {}", self.path.display(), e);
                return Err(e.into());
            }
        };

        let loaded: HashMap<String, Model> = serde_json::from_str(&content).map_err(|e| {
            log::error!("Invalid storage file {}: {}", self.path.display(), e);
            HbnbError::SerializationError(format!("Invalid file format - {}", e))
        })?;

        let mut objects = self.objects.write().await;
        objects.clear();
        for model in loaded.into_values() {
            objects.insert(model.key(), model);
        }

        log::info!("Loaded {} objects from {}", objects.len(), self.path.display());
        Ok(())
    }

    async fn close(&self) -> Result<(), HbnbError> {
        self.reload().await
    }

    async fn get(&self, kind: ModelKind, id: &str) -> Result<Option<Model>, HbnbError> {
        Ok(self.objects.read().await.get(&kind.key(id)).cloned())
    }

    async fn count(&self, kind: Option<ModelKind>) -> Result<usize, HbnbError> {
        let objects = self.objects.read().await;
        Ok(match kind {
            Some(kind) => objects.values().filter(|m| m.kind() == kind).count(),
            None => objects.len(),
        })
    }

    async fn cities_of(&self, state_id: &str) -> Result<Vec<City>, HbnbError> {
        let mut cities = self.objects_of::<City>().await;
        cities.retain(|city| city.state_id == state_id);
        Ok(cities)
    }

    async fn places_of(&self, city_id: &str) -> Result<Vec<Place>, HbnbError> {
        let mut places = self.objects_of::<Place>().await;
        places.retain(|place| place.city_id == city_id);
        Ok(places)
    }

    async fn reviews_of(&self, place_id: &str) -> Result<Vec<Review>, HbnbError> {
        let mut reviews = self.objects_of::<Review>().await;
        reviews.retain(|review| review.place_id == place_id);
        Ok(reviews)
    }

    async fn amenities_of(&self, place: &Place) -> Result<Vec<Amenity>, HbnbError> {
        let mut amenities = self.objects_of::<Amenity>().await;
        amenities.retain(|amenity| place.amenity_ids.contains(&amenity.id));
        Ok(amenities)
    }

    async fn link_amenity(&self, place: &mut Place, amenity: &Amenity) -> Result<(), HbnbError> {
        if !place.track_amenity(&amenity.id) {
            log::debug!("Amenity {} already linked to place {}", amenity.id, place.id);
            return Ok(());
        }

        // Keep the registered copy in step with the caller's instance
        let key = ModelKind::Place.key(&place.id);
        let mut objects = self.objects.write().await;
        if objects.contains_key(&key) {
            objects.insert(key, Model::Place(place.clone()));
        }

        log::info!("Linked amenity {} to place {}", amenity.id, place.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{State, User};
    use tempfile::tempdir;

    async fn storage_in(dir: &tempfile::TempDir) -> FileStorage {
        let storage = FileStorage::open(dir.path().join("file.json"));
        storage.reload().await.unwrap();
        storage
    }

    #[tokio::test]
    async fn test_reload_without_file_is_empty() {
        let dir = tempdir().unwrap();
        let storage = storage_in(&dir).await;

        assert_eq!(storage.count(None).await.unwrap(), 0);
        assert!(storage.all(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reload_without_file_keeps_objects() {
        let dir = tempdir().unwrap();
        let storage = storage_in(&dir).await;

        let state = State::new("Nevada");
        storage.add(state.clone().into()).await.unwrap();

        storage.reload().await.unwrap();
        assert_eq!(storage.count(None).await.unwrap(), 1);

        storage.close().await.unwrap();
        assert!(storage.get(ModelKind::State, &state.id).await.unwrap().is_some());
        assert!(!storage.path().exists());
    }

    #[tokio::test]
    async fn test_save_and_reload_round_trip() {
        let dir = tempdir().unwrap();
        let storage = storage_in(&dir).await;

        let state = State::new("California");
        let mut place = Place::new("city-1", "user-1", "Sunny loft");
        place.number_rooms = 3;
        place.latitude = Some(37.7749);
        place.longitude = Some(-122.4194);
        place.description = Some("Near the park".to_string());

        storage.add(state.clone().into()).await.unwrap();
        storage.add(place.clone().into()).await.unwrap();
        storage.save().await.unwrap();

        let reopened = storage_in(&dir).await;
        assert_eq!(reopened.count(None).await.unwrap(), 2);
        assert_eq!(
            reopened.get(ModelKind::State, &state.id).await.unwrap(),
            Some(Model::State(state))
        );
        assert_eq!(
            reopened.get(ModelKind::Place, &place.id).await.unwrap(),
            Some(Model::Place(place))
        );
    }

    #[tokio::test]
    async fn test_file_uses_class_keys() {
        let dir = tempdir().unwrap();
        let storage = storage_in(&dir).await;

        let amenity = Amenity::new("Wifi");
        storage.add(amenity.clone().into()).await.unwrap();
        storage.save().await.unwrap();

        let raw = std::fs::read_to_string(storage.path()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let entry = &json[format!("Amenity.{}", amenity.id)];
        assert_eq!(entry["__class__"], "Amenity");
        assert_eq!(entry["name"], "Wifi");
    }

    #[tokio::test]
    async fn test_all_filters_by_kind() {
        let dir = tempdir().unwrap();
        let storage = storage_in(&dir).await;

        storage.add(State::new("Texas").into()).await.unwrap();
        storage.add(State::new("Ohio").into()).await.unwrap();
        storage.add(User::new("a@b.c", "pwd").into()).await.unwrap();

        let states = storage.all(Some(ModelKind::State)).await.unwrap();
        assert_eq!(states.len(), 2);
        assert!(states.keys().all(|k| k.starts_with("State.")));
        assert_eq!(storage.count(Some(ModelKind::User)).await.unwrap(), 1);
        assert_eq!(storage.count(None).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_add_rejects_invalid_model() {
        let dir = tempdir().unwrap();
        let storage = storage_in(&dir).await;

        let result = storage.add(State::new("").into()).await;
        assert!(matches!(result, Err(HbnbError::ValidationError(_))));
        assert_eq!(storage.count(None).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_state_cities_filters_by_state_id() {
        let dir = tempdir().unwrap();
        let storage = storage_in(&dir).await;

        let california = State::new("California");
        let nevada = State::new("Nevada");
        let sf = City::new(&california.id, "San Francisco");
        let la = City::new(&california.id, "Los Angeles");
        let reno = City::new(&nevada.id, "Reno");

        for model in [
            Model::from(california.clone()),
            nevada.clone().into(),
            sf.clone().into(),
            la.clone().into(),
            reno.clone().into(),
        ] {
            storage.add(model).await.unwrap();
        }

        let cities = california.cities(&storage).await.unwrap();
        let mut names: Vec<&str> = cities.iter().map(|c| c.name.as_str()).collect();
        names.sort();
        assert_eq!(names, vec!["Los Angeles", "San Francisco"]);

        let cities = nevada.cities(&storage).await.unwrap();
        assert_eq!(cities, vec![reno]);

        let empty = State::new("Oregon");
        assert!(empty.cities(&storage).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_place_reviews_filters_by_place_id() {
        let dir = tempdir().unwrap();
        let storage = storage_in(&dir).await;

        let place = Place::new("city-1", "user-1", "Loft");
        let other = Place::new("city-1", "user-1", "Cabin");
        let good = Review::new(&place.id, "user-2", "Great stay");
        let bad = Review::new(&other.id, "user-2", "Too cold");

        storage.add(place.clone().into()).await.unwrap();
        storage.add(other.clone().into()).await.unwrap();
        storage.add(good.clone().into()).await.unwrap();
        storage.add(bad.clone().into()).await.unwrap();

        assert_eq!(place.reviews(&storage).await.unwrap(), vec![good]);
        assert_eq!(other.reviews(&storage).await.unwrap(), vec![bad]);
    }

    #[tokio::test]
    async fn test_city_places() {
        let dir = tempdir().unwrap();
        let storage = storage_in(&dir).await;

        let city = City::new("state-1", "Austin");
        let place = Place::new(&city.id, "user-1", "Bungalow");
        storage.add(city.clone().into()).await.unwrap();
        storage.add(place.clone().into()).await.unwrap();
        storage
            .add(Place::new("elsewhere", "user-1", "Shack").into())
            .await
            .unwrap();

        assert_eq!(city.places(&storage).await.unwrap(), vec![place]);
    }

    #[tokio::test]
    async fn test_set_amenity_links_amenities_only() {
        let dir = tempdir().unwrap();
        let storage = storage_in(&dir).await;

        let wifi = Amenity::new("Wifi");
        let pool = Amenity::new("Pool");
        let mut place = Place::new("city-1", "user-1", "Loft");
        storage.add(wifi.clone().into()).await.unwrap();
        storage.add(pool.clone().into()).await.unwrap();
        storage.add(place.clone().into()).await.unwrap();

        let linked = place
            .set_amenity(&storage, &Model::Amenity(wifi.clone()))
            .await
            .unwrap();
        assert!(linked);

        let ignored = place
            .set_amenity(&storage, &Model::State(State::new("Utah")))
            .await
            .unwrap();
        assert!(!ignored);

        assert_eq!(place.amenity_ids, vec![wifi.id.clone()]);
        assert_eq!(place.amenities(&storage).await.unwrap(), vec![wifi.clone()]);

        // Linking twice records the id once
        place.link_amenity(&storage, &wifi).await.unwrap();
        assert_eq!(place.amenity_ids.len(), 1);

        // The registered copy follows the instance
        match storage.get(ModelKind::Place, &place.id).await.unwrap() {
            Some(Model::Place(stored)) => assert_eq!(stored.amenity_ids, vec![wifi.id]),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_amenities_do_not_leak_between_places() {
        let dir = tempdir().unwrap();
        let storage = storage_in(&dir).await;

        let wifi = Amenity::new("Wifi");
        let mut first = Place::new("city-1", "user-1", "Loft");
        let second = Place::new("city-1", "user-1", "Cabin");
        storage.add(wifi.clone().into()).await.unwrap();

        first.link_amenity(&storage, &wifi).await.unwrap();

        assert_eq!(first.amenities(&storage).await.unwrap().len(), 1);
        assert!(second.amenity_ids.is_empty());
        assert!(second.amenities(&storage).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_does_not_cascade() {
        let dir = tempdir().unwrap();
        let storage = storage_in(&dir).await;

        let place = Place::new("city-1", "user-1", "Loft");
        let review = Review::new(&place.id, "user-2", "Lovely");
        storage.add(place.clone().into()).await.unwrap();
        storage.add(review.clone().into()).await.unwrap();

        storage.delete(ModelKind::Place, &place.id).await.unwrap();

        assert!(storage.get(ModelKind::Place, &place.id).await.unwrap().is_none());
        assert!(storage.get(ModelKind::Review, &review.id).await.unwrap().is_some());

        let missing = storage.delete(ModelKind::Place, &place.id).await;
        assert!(matches!(missing, Err(HbnbError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_close_discards_unsaved_changes() {
        let dir = tempdir().unwrap();
        let storage = storage_in(&dir).await;

        let kept = State::new("Kept");
        storage.add(kept.clone().into()).await.unwrap();
        storage.save().await.unwrap();

        storage.add(State::new("Unsaved").into()).await.unwrap();
        storage.close().await.unwrap();

        assert_eq!(storage.count(None).await.unwrap(), 1);
        assert!(storage.get(ModelKind::State, &kept.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_reload_rejects_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("file.json");
        std::fs::write(&path, "{ not json").unwrap();

        let storage = FileStorage::open(&path);
        let result = storage.reload().await;
        assert!(matches!(result, Err(HbnbError::SerializationError(_))));
    }
}
