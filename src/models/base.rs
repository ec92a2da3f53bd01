// src/models/base.rs
// DOCUMENTATION: Shared identity, timestamps and the polymorphic model wrapper
// PURPOSE: Lets both storage strategies handle every entity through one type

use chrono::{NaiveDateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use super::{Amenity, City, Place, Review, State, User};
use crate::errors::HbnbError;

/// Fresh UUID v4 identifier, stored as text in both strategies
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Current UTC time truncated to what a DATETIME(6) column keeps
pub fn now() -> NaiveDateTime {
    Utc::now().naive_utc().trunc_subsecs(6)
}

/// Entity discriminator
/// DOCUMENTATION: Maps each entity to its class name (file keys) and table name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModelKind {
    Amenity,
    City,
    Place,
    Review,
    State,
    User,
}

impl ModelKind {
    pub const ALL: [ModelKind; 6] = [
        ModelKind::Amenity,
        ModelKind::City,
        ModelKind::Place,
        ModelKind::Review,
        ModelKind::State,
        ModelKind::User,
    ];

    /// Class name used in `"<Class>.<id>"` keys and the `__class__` tag
    pub fn class_name(&self) -> &'static str {
        match self {
            ModelKind::Amenity => "Amenity",
            ModelKind::City => "City",
            ModelKind::Place => "Place",
            ModelKind::Review => "Review",
            ModelKind::State => "State",
            ModelKind::User => "User",
        }
    }

    /// Table backing this entity in database mode
    pub fn table(&self) -> &'static str {
        match self {
            ModelKind::Amenity => "amenities",
            ModelKind::City => "cities",
            ModelKind::Place => "places",
            ModelKind::Review => "reviews",
            ModelKind::State => "states",
            ModelKind::User => "users",
        }
    }

    /// Storage key for an object of this kind
    pub fn key(&self, id: &str) -> String {
        format!("{}.{}", self.class_name(), id)
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

impl FromStr for ModelKind {
    type Err = HbnbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.class_name() == s)
            .ok_or_else(|| HbnbError::InvalidInput(format!("Unknown class: {}", s)))
    }
}

/// Any stored object
/// DOCUMENTATION: Serialized with a `__class__` tag so the JSON file is self-describing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "__class__")]
pub enum Model {
    Amenity(Amenity),
    City(City),
    Place(Place),
    Review(Review),
    State(State),
    User(User),
}

impl Model {
    pub fn kind(&self) -> ModelKind {
        match self {
            Model::Amenity(_) => ModelKind::Amenity,
            Model::City(_) => ModelKind::City,
            Model::Place(_) => ModelKind::Place,
            Model::Review(_) => ModelKind::Review,
            Model::State(_) => ModelKind::State,
            Model::User(_) => ModelKind::User,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Model::Amenity(m) => &m.id,
            Model::City(m) => &m.id,
            Model::Place(m) => &m.id,
            Model::Review(m) => &m.id,
            Model::State(m) => &m.id,
            Model::User(m) => &m.id,
        }
    }

    pub fn created_at(&self) -> NaiveDateTime {
        match self {
            Model::Amenity(m) => m.created_at,
            Model::City(m) => m.created_at,
            Model::Place(m) => m.created_at,
            Model::Review(m) => m.created_at,
            Model::State(m) => m.created_at,
            Model::User(m) => m.created_at,
        }
    }

    /// `"<Class>.<id>"`
    pub fn key(&self) -> String {
        self.kind().key(self.id())
    }

    /// Refresh `updated_at` before the object is saved again
    pub fn touch(&mut self) {
        let stamp = now();
        match self {
            Model::Amenity(m) => m.updated_at = stamp,
            Model::City(m) => m.updated_at = stamp,
            Model::Place(m) => m.updated_at = stamp,
            Model::Review(m) => m.updated_at = stamp,
            Model::State(m) => m.updated_at = stamp,
            Model::User(m) => m.updated_at = stamp,
        }
    }

    /// Check required fields and column limits
    pub fn validate(&self) -> Result<(), HbnbError> {
        match self {
            Model::Amenity(m) => m.validate()?,
            Model::City(m) => m.validate()?,
            Model::Place(m) => m.validate()?,
            Model::Review(m) => m.validate()?,
            Model::State(m) => m.validate()?,
            Model::User(m) => m.validate()?,
        }
        Ok(())
    }
}

/// Typed access to one variant of [`Model`]
/// DOCUMENTATION: Used by relationship queries to pull concrete entities out of a store
pub trait Entity: Sized {
    const KIND: ModelKind;

    fn id(&self) -> &str;

    fn created_at(&self) -> NaiveDateTime;

    fn from_model(model: Model) -> Option<Self>;

    fn into_model(self) -> Model;
}

macro_rules! impl_entity {
    ($ty:ident) => {
        impl Entity for $ty {
            const KIND: ModelKind = ModelKind::$ty;

            fn id(&self) -> &str {
                &self.id
            }

            fn created_at(&self) -> NaiveDateTime {
                self.created_at
            }

            fn from_model(model: Model) -> Option<Self> {
                match model {
                    Model::$ty(inner) => Some(inner),
                    _ => None,
                }
            }

            fn into_model(self) -> Model {
                Model::$ty(self)
            }
        }

        impl From<$ty> for Model {
            fn from(value: $ty) -> Self {
                Model::$ty(value)
            }
        }
    };
}

impl_entity!(Amenity);
impl_entity!(City);
impl_entity!(Place);
impl_entity!(Review);
impl_entity!(State);
impl_entity!(User);

/// Order entities by creation time, then id, so both strategies agree
pub fn sort_by_creation<T: Entity>(items: &mut [T]) {
    items.sort_by(|a, b| {
        a.created_at()
            .cmp(&b.created_at())
            .then_with(|| a.id().cmp(b.id()))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(ModelKind::Place.class_name(), "Place");
        assert_eq!(ModelKind::Amenity.table(), "amenities");
        assert_eq!(ModelKind::State.key("abc"), "State.abc");
        assert_eq!("Review".parse::<ModelKind>().unwrap(), ModelKind::Review);
        assert!("BaseModel".parse::<ModelKind>().is_err());
    }

    #[test]
    fn test_model_json_carries_class_tag() {
        let state = State::new("California");
        let model = Model::from(state.clone());

        let json = serde_json::to_value(&model).unwrap();
        assert_eq!(json["__class__"], "State");
        assert_eq!(json["name"], "California");

        let back: Model = serde_json::from_value(json).unwrap();
        assert_eq!(back, Model::State(state));
    }

    #[test]
    fn test_touch_moves_updated_at_forward() {
        let mut model = Model::from(Amenity::new("Wifi"));
        let created = model.created_at();
        std::thread::sleep(std::time::Duration::from_millis(2));
        model.touch();

        match model {
            Model::Amenity(a) => {
                assert_eq!(a.created_at, created);
                assert!(a.updated_at > created);
            }
            _ => panic!("expected amenity"),
        }
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        assert!(Model::from(State::new("")).validate().is_err());
        assert!(Model::from(State::new("Nevada")).validate().is_ok());
    }

    #[test]
    fn test_sort_by_creation_is_deterministic() {
        let mut a = City::new("s", "Alpha");
        let mut b = City::new("s", "Beta");
        b.created_at = a.created_at;
        a.id = "b-id".to_string();
        b.id = "a-id".to_string();

        let mut cities = vec![a, b];
        sort_by_creation(&mut cities);
        assert_eq!(cities[0].name, "Beta");
    }
}
