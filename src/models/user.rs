// src/models/user.rs
// DOCUMENTATION: User account entity
// PURPOSE: Users own places and write reviews

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::base::{new_id, now};

/// Host or guest account
/// DOCUMENTATION: Owns places and writes reviews; deleting a user cascades in database mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, Validate)]
pub struct User {
    pub id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,

    #[validate(length(min = 1, max = 128))]
    pub email: String,

    #[validate(length(min = 1, max = 128))]
    pub password: String,

    #[validate(length(max = 128))]
    pub first_name: Option<String>,

    #[validate(length(max = 128))]
    pub last_name: Option<String>,
}

impl User {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        let stamp = now();
        User {
            id: new_id(),
            created_at: stamp,
            updated_at: stamp,
            email: email.into(),
            password: password.into(),
            first_name: None,
            last_name: None,
        }
    }
}
