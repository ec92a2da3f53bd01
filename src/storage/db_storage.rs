// src/storage/db_storage.rs
// DOCUMENTATION: MySQL storage strategy
// PURPOSE: Stage objects, upsert them transactionally, resolve relationships with SQL

use async_trait::async_trait;
use sqlx::MySqlPool;
use std::collections::HashMap;
use tokio::sync::Mutex;

use super::Storage;
use crate::config::{init_db_pool, Config};
use crate::db::{
    schema, AmenityRepository, CityRepository, ModelRepository, PlaceRepository,
    ReviewRepository, StateRepository, UserRepository,
};
use crate::errors::HbnbError;
use crate::models::{Amenity, City, Model, ModelKind, Place, Review};

/// Database-backed storage
/// DOCUMENTATION: `add` stages objects in memory; `save` writes them in one
/// transaction, parents before children so foreign keys resolve.
/// Deletes cascade through the schema's foreign keys.
pub struct DbStorage {
    pool: MySqlPool,
    pending: Mutex<Vec<Model>>,
    drop_on_reload: bool,
}

/// Insert order that satisfies every foreign key
fn save_rank(kind: ModelKind) -> u8 {
    match kind {
        ModelKind::State => 0,
        ModelKind::City => 1,
        ModelKind::User => 2,
        ModelKind::Amenity => 3,
        ModelKind::Place => 4,
        ModelKind::Review => 5,
    }
}

impl DbStorage {
    /// Connect using the HBNB_MYSQL_* settings
    pub async fn connect(config: &Config) -> Result<Self, HbnbError> {
        let pool = init_db_pool(config).await.map_err(|e| {
            log::error!("Failed to connect to database: {}", e);
            HbnbError::DatabaseError(e.to_string())
        })?;

        Ok(Self::with_pool(pool, config.is_test_env()))
    }

    /// Wrap an existing pool; `drop_on_reload` wipes the schema on every reload
    pub fn with_pool(pool: MySqlPool, drop_on_reload: bool) -> Self {
        DbStorage {
            pool,
            pending: Mutex::new(Vec::new()),
            drop_on_reload,
        }
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    async fn list_kind(&self, kind: ModelKind) -> Result<Vec<Model>, HbnbError> {
        let models = match kind {
            ModelKind::Amenity => into_models(AmenityRepository::list(&self.pool).await?),
            ModelKind::City => into_models(CityRepository::list(&self.pool).await?),
            ModelKind::Place => into_models(PlaceRepository::list(&self.pool).await?),
            ModelKind::Review => into_models(ReviewRepository::list(&self.pool).await?),
            ModelKind::State => into_models(StateRepository::list(&self.pool).await?),
            ModelKind::User => into_models(UserRepository::list(&self.pool).await?),
        };
        Ok(models)
    }
}

fn into_models<T: Into<Model>>(items: Vec<T>) -> Vec<Model> {
    items.into_iter().map(Into::into).collect()
}

#[async_trait]
impl Storage for DbStorage {
    async fn all(&self, kind: Option<ModelKind>) -> Result<HashMap<String, Model>, HbnbError> {
        let kinds = match kind {
            Some(kind) => vec![kind],
            None => ModelKind::ALL.to_vec(),
        };

        let mut objects = HashMap::new();
        for kind in kinds {
            for model in self.list_kind(kind).await? {
                objects.insert(model.key(), model);
            }
        }

        log::debug!("Fetched {} objects", objects.len());
        Ok(objects)
    }

    async fn add(&self, model: Model) -> Result<(), HbnbError> {
        model.validate()?;

        let mut pending = self.pending.lock().await;
        let key = model.key();
        // A second add of the same object replaces the staged copy
        pending.retain(|staged| staged.key() != key);
        pending.push(model);
        log::debug!("Staged {}", key);
        Ok(())
    }

    async fn save(&self) -> Result<(), HbnbError> {
        let mut pending = self.pending.lock().await;
        if pending.is_empty() {
            return Ok(());
        }

        pending.sort_by_key(|model| save_rank(model.kind()));

        let mut tx = self.pool.begin().await.map_err(|e| {
            log::error!("Failed to open transaction: {}", e);
            HbnbError::DatabaseError(e.to_string())
        })?;

        for model in pending.iter() {
            match model {
                Model::Amenity(m) => AmenityRepository::upsert(&mut tx, m).await?,
                Model::City(m) => CityRepository::upsert(&mut tx, m).await?,
                Model::Place(m) => PlaceRepository::upsert(&mut tx, m).await?,
                Model::Review(m) => ReviewRepository::upsert(&mut tx, m).await?,
                Model::State(m) => StateRepository::upsert(&mut tx, m).await?,
                Model::User(m) => UserRepository::upsert(&mut tx, m).await?,
            }
        }

        tx.commit().await.map_err(|e| {
            log::error!("Failed to commit {} objects: {}", pending.len(), e);
            HbnbError::DatabaseError(e.to_string())
        })?;

        log::info!("Saved {} objects", pending.len());
        pending.clear();
        Ok(())
    }

    async fn delete(&self, kind: ModelKind, id: &str) -> Result<(), HbnbError> {
        let key = kind.key(id);
        self.pending.lock().await.retain(|staged| staged.key() != key);
        ModelRepository::delete_by_id(&self.pool, kind, id).await
    }

    async fn reload(&self) -> Result<(), HbnbError> {
        if self.drop_on_reload {
            schema::drop_all(&self.pool).await?;
        }
        schema::create_all(&self.pool).await?;
        self.pending.lock().await.clear();
        Ok(())
    }

    async fn close(&self) -> Result<(), HbnbError> {
        self.pool.close().await;
        log::info!("Database pool closed");
        Ok(())
    }

    async fn get(&self, kind: ModelKind, id: &str) -> Result<Option<Model>, HbnbError> {
        let model = match kind {
            ModelKind::Amenity => AmenityRepository::get_by_id(&self.pool, id)
                .await?
                .map(Model::from),
            ModelKind::City => CityRepository::get_by_id(&self.pool, id).await?.map(Model::from),
            ModelKind::Place => PlaceRepository::get_by_id(&self.pool, id)
                .await?
                .map(Model::from),
            ModelKind::Review => ReviewRepository::get_by_id(&self.pool, id)
                .await?
                .map(Model::from),
            ModelKind::State => StateRepository::get_by_id(&self.pool, id)
                .await?
                .map(Model::from),
            ModelKind::User => UserRepository::get_by_id(&self.pool, id).await?.map(Model::from),
        };

        if model.is_none() {
            log::debug!("No row for {}", kind.key(id));
        }
        Ok(model)
    }

    async fn count(&self, kind: Option<ModelKind>) -> Result<usize, HbnbError> {
        let kinds = match kind {
            Some(kind) => vec![kind],
            None => ModelKind::ALL.to_vec(),
        };

        let mut total = 0;
        for kind in kinds {
            total += ModelRepository::count(&self.pool, kind).await?;
        }
        Ok(total as usize)
    }

    async fn cities_of(&self, state_id: &str) -> Result<Vec<City>, HbnbError> {
        CityRepository::get_by_state(&self.pool, state_id).await
    }

    async fn places_of(&self, city_id: &str) -> Result<Vec<Place>, HbnbError> {
        PlaceRepository::get_by_city(&self.pool, city_id).await
    }

    async fn reviews_of(&self, place_id: &str) -> Result<Vec<Review>, HbnbError> {
        ReviewRepository::get_by_place(&self.pool, place_id).await
    }

    async fn amenities_of(&self, place: &Place) -> Result<Vec<Amenity>, HbnbError> {
        AmenityRepository::get_by_place(&self.pool, &place.id).await
    }

    async fn link_amenity(&self, place: &mut Place, amenity: &Amenity) -> Result<(), HbnbError> {
        // A staged place gets the link written by the next save
        let key = ModelKind::Place.key(&place.id);
        {
            let mut pending = self.pending.lock().await;
            if let Some(Model::Place(staged)) = pending.iter_mut().find(|m| m.key() == key) {
                staged.track_amenity(&amenity.id);
                place.track_amenity(&amenity.id);
                log::debug!("Staged amenity {} for place {}", amenity.id, place.id);
                return Ok(());
            }
        }

        let mut conn = self.pool.acquire().await.map_err(|e| {
            log::error!("Failed to acquire connection: {}", e);
            HbnbError::DatabaseError(e.to_string())
        })?;

        PlaceRepository::link_amenity(&mut conn, &place.id, &amenity.id).await?;
        place.track_amenity(&amenity.id);

        log::info!("Linked amenity {} to place {}", amenity.id, place.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::connect_pool;
    use crate::models::{State, User};
    use sqlx::mysql::MySqlConnectOptions;

    /// Fresh storage on the database named by HBNB_TEST_DATABASE_URL
    /// The schema there is dropped and recreated
    async fn test_storage() -> DbStorage {
        let url = std::env::var("HBNB_TEST_DATABASE_URL")
            .expect("HBNB_TEST_DATABASE_URL must name a disposable MySQL database");
        let options: MySqlConnectOptions = url.parse().expect("valid mysql:// url");

        let pool = connect_pool(options, 2, 10)
            .await
            .expect("test database reachable");
        let storage = DbStorage::with_pool(pool, true);
        storage.reload().await.expect("schema created");
        storage
    }

    struct Fixture {
        state: State,
        city: City,
        user: User,
    }

    async fn seed(storage: &DbStorage) -> Fixture {
        let state = State::new("California");
        let city = City::new(&state.id, "San Francisco");
        let user = User::new("host@example.com", "secret");

        // Children first: save must reorder them
        storage.add(user.clone().into()).await.unwrap();
        storage.add(city.clone().into()).await.unwrap();
        storage.add(state.clone().into()).await.unwrap();
        storage.save().await.unwrap();

        Fixture { state, city, user }
    }

    #[test]
    fn test_save_rank_orders_parents_first() {
        assert!(save_rank(ModelKind::State) < save_rank(ModelKind::City));
        assert!(save_rank(ModelKind::City) < save_rank(ModelKind::Place));
        assert!(save_rank(ModelKind::User) < save_rank(ModelKind::Place));
        assert!(save_rank(ModelKind::Amenity) < save_rank(ModelKind::Place));
        assert!(save_rank(ModelKind::Place) < save_rank(ModelKind::Review));
    }

    // Sequential: every database test drops and recreates the shared schema
    #[tokio::test]
    #[ignore = "needs HBNB_TEST_DATABASE_URL"]
    async fn test_database_storage() {
        let storage = test_storage().await;

        place_round_trip(&storage).await;
        storage.reload().await.unwrap();
        link_before_save_is_written(&storage).await;
        storage.reload().await.unwrap();
        link_to_unknown_place_is_an_error(&storage).await;
        storage.reload().await.unwrap();
        state_cities(&storage).await;
        storage.reload().await.unwrap();
        place_delete_cascades_reviews(&storage).await;
        storage.reload().await.unwrap();
        missing_delete_is_not_found(&storage).await;

        storage.close().await.unwrap();
    }

    async fn place_round_trip(storage: &DbStorage) {
        let fixture = seed(storage).await;

        let mut place = Place::new(&fixture.city.id, &fixture.user.id, "Painted lady");
        place.description = Some("Victorian house".to_string());
        place.number_rooms = 4;
        place.number_bathrooms = 2;
        place.max_guest = 8;
        place.price_by_night = 250;
        place.latitude = Some(37.7764);
        place.longitude = Some(-122.4327);

        // Linked in the reverse of their id order
        let mut spa = Amenity::new("Spa");
        spa.id = "f47ac10b-58cc-4372-a567-0e02b2c3d479".to_string();
        let mut balcony = Amenity::new("Balcony");
        balcony.id = "0b6f1a2e-1c4d-4e8f-9a3b-5d7c9e1f2a4b".to_string();

        storage.add(spa.clone().into()).await.unwrap();
        storage.add(balcony.clone().into()).await.unwrap();
        storage.add(place.clone().into()).await.unwrap();
        storage.save().await.unwrap();

        place.link_amenity(storage, &spa).await.unwrap();
        place.link_amenity(storage, &balcony).await.unwrap();
        assert_eq!(place.amenity_ids, vec![balcony.id.clone(), spa.id.clone()]);

        let loaded = storage.get(ModelKind::Place, &place.id).await.unwrap();
        assert_eq!(loaded, Some(Model::Place(place.clone())));

        let all = storage.all(Some(ModelKind::Place)).await.unwrap();
        assert_eq!(all.get(&format!("Place.{}", place.id)), Some(&Model::Place(place)));
    }

    async fn link_before_save_is_written(storage: &DbStorage) {
        let fixture = seed(storage).await;

        let wifi = Amenity::new("Wifi");
        let mut place = Place::new(&fixture.city.id, &fixture.user.id, "Studio");
        storage.add(wifi.clone().into()).await.unwrap();
        storage.add(place.clone().into()).await.unwrap();

        place.link_amenity(storage, &wifi).await.unwrap();
        assert_eq!(place.amenity_ids, vec![wifi.id.clone()]);
        storage.save().await.unwrap();

        let stored = PlaceRepository::amenity_ids(storage.pool(), &place.id)
            .await
            .unwrap();
        assert_eq!(stored, vec![wifi.id.clone()]);
        assert_eq!(place.amenities(storage).await.unwrap(), vec![wifi]);
    }

    async fn link_to_unknown_place_is_an_error(storage: &DbStorage) {
        let wifi = Amenity::new("Wifi");
        storage.add(wifi.clone().into()).await.unwrap();
        storage.save().await.unwrap();

        let mut ghost = Place::new("no-city", "no-user", "Nowhere");
        let result = ghost.link_amenity(storage, &wifi).await;
        assert!(matches!(result, Err(HbnbError::DatabaseError(_))));
        assert!(ghost.amenity_ids.is_empty());
    }

    async fn state_cities(storage: &DbStorage) {
        let fixture = seed(storage).await;
        let other = State::new("Nevada");
        let reno = City::new(&other.id, "Reno");
        storage.add(other.clone().into()).await.unwrap();
        storage.add(reno.clone().into()).await.unwrap();
        storage.save().await.unwrap();

        let cities = fixture.state.cities(storage).await.unwrap();
        assert_eq!(cities, vec![fixture.city.clone()]);
        assert_eq!(other.cities(storage).await.unwrap(), vec![reno]);
        assert_eq!(storage.count(Some(ModelKind::City)).await.unwrap(), 2);

        // Deleting a state removes its cities
        storage.delete(ModelKind::State, &fixture.state.id).await.unwrap();
        assert!(storage
            .get(ModelKind::City, &fixture.city.id)
            .await
            .unwrap()
            .is_none());
    }

    async fn place_delete_cascades_reviews(storage: &DbStorage) {
        let fixture = seed(storage).await;

        let wifi = Amenity::new("Wifi");
        let mut place = Place::new(&fixture.city.id, &fixture.user.id, "Loft");
        let review = Review::new(&place.id, &fixture.user.id, "Great view");
        storage.add(wifi.clone().into()).await.unwrap();
        storage.add(review.clone().into()).await.unwrap();
        storage.add(place.clone().into()).await.unwrap();
        storage.save().await.unwrap();

        let linked = place
            .set_amenity(storage, &Model::Amenity(wifi.clone()))
            .await
            .unwrap();
        assert!(linked);
        let ignored = place
            .set_amenity(storage, &Model::User(fixture.user.clone()))
            .await
            .unwrap();
        assert!(!ignored);

        assert_eq!(place.amenities(storage).await.unwrap(), vec![wifi.clone()]);
        assert_eq!(place.reviews(storage).await.unwrap(), vec![review.clone()]);

        storage.delete(ModelKind::Place, &place.id).await.unwrap();

        assert!(storage
            .get(ModelKind::Review, &review.id)
            .await
            .unwrap()
            .is_none());
        assert!(storage
            .get(ModelKind::Amenity, &wifi.id)
            .await
            .unwrap()
            .is_some());
        assert!(PlaceRepository::amenity_ids(storage.pool(), &place.id)
            .await
            .unwrap()
            .is_empty());
    }

    async fn missing_delete_is_not_found(storage: &DbStorage) {
        let result = storage.delete(ModelKind::Amenity, "no-such-id").await;
        assert!(matches!(result, Err(HbnbError::NotFound(_))));
    }
}
