// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export model components

pub mod amenity;
pub mod base;
pub mod city;
pub mod place;
pub mod review;
pub mod state;
pub mod user;

pub use amenity::*;
pub use base::*;
pub use city::*;
pub use place::*;
pub use review::*;
pub use state::*;
pub use user::*;
