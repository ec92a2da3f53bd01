// src/db/mod.rs
// DOCUMENTATION: Database module organization
// PURPOSE: Re-export database components

pub mod amenity_repository;
pub mod city_repository;
pub mod place_repository;
pub mod repository;
pub mod review_repository;
pub mod schema;
pub mod state_repository;
pub mod user_repository;

pub use amenity_repository::*;
pub use city_repository::*;
pub use place_repository::*;
pub use repository::*;
pub use review_repository::*;
pub use state_repository::*;
pub use user_repository::*;
