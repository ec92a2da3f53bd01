// src/models/review.rs
// DOCUMENTATION: Review entity
// PURPOSE: Reviews tie a user to a place

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::base::{new_id, now};

/// Guest review of a place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, Validate)]
pub struct Review {
    pub id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,

    #[validate(length(min = 1, max = 60))]
    pub place_id: String,

    #[validate(length(min = 1, max = 60))]
    pub user_id: String,

    #[validate(length(min = 1, max = 1024))]
    pub text: String,
}

impl Review {
    pub fn new(
        place_id: impl Into<String>,
        user_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        let stamp = now();
        Review {
            id: new_id(),
            created_at: stamp,
            updated_at: stamp,
            place_id: place_id.into(),
            user_id: user_id.into(),
            text: text.into(),
        }
    }
}
