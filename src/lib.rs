// src/lib.rs
// DOCUMENTATION: Library root
// PURPOSE: Vacation-rental models with interchangeable file and MySQL storage

pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod storage;

pub use errors::HbnbError;
pub use storage::{init_storage, Storage};
