use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::util::{default_user_name, empty_as_none, validate_non_blank};

pub const RATING_COLUMNS: &str = "id, movie_id, user_name, rating, created_at";

#[derive(Serialize, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Rating {
    pub id: Uuid,
    #[serde(rename = "movie")]
    pub movie_id: Uuid,
    pub user_name: String,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize, Validate, Debug, Clone)]
pub struct RatingPayload {
    pub movie: Uuid,
    #[serde(default = "default_user_name")]
    #[validate(length(
        min = 1,
        max = 100,
        message = "User name must be between 1 and 100 characters long."
    ), custom(function = "validate_non_blank"))]
    pub user_name: String,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5."))]
    pub rating: i32,
}

#[derive(Deserialize, Debug, Default)]
pub struct RatingPatch {
    pub movie: Option<Uuid>,
    pub user_name: Option<String>,
    pub rating: Option<i32>,
}

impl RatingPatch {
    pub fn apply(self, rating: &Rating) -> RatingPayload {
        RatingPayload {
            movie: self.movie.unwrap_or(rating.movie_id),
            user_name: self.user_name.unwrap_or_else(|| rating.user_name.clone()),
            rating: self.rating.unwrap_or(rating.rating),
        }
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct RatingFilter {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub movie_id: Option<Uuid>,
}
