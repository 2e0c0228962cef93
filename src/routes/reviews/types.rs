use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::routes::Comment;
use crate::util::{default_user_name, empty_as_none, validate_non_blank};

pub const REVIEW_COLUMNS: &str =
    "id, movie_id, user_name, title, content, rating, helpful_count, created_at, updated_at";

#[derive(Serialize, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Review {
    pub id: Uuid,
    #[serde(rename = "movie")]
    pub movie_id: Uuid,
    pub user_name: String,
    pub title: String,
    pub content: String,
    pub rating: i32,
    pub helpful_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Debug)]
pub struct ReviewDetails {
    #[serde(flatten)]
    pub review: Review,
    pub comments: Vec<Comment>,
}

#[derive(Deserialize, Validate, Debug, Clone)]
pub struct ReviewPayload {
    pub movie: Uuid,
    #[serde(default = "default_user_name")]
    #[validate(length(
        min = 1,
        max = 100,
        message = "User name must be between 1 and 100 characters long."
    ), custom(function = "validate_non_blank"))]
    pub user_name: String,
    #[validate(length(
        min = 1,
        max = 200,
        message = "Title must be between 1 and 200 characters long."
    ), custom(function = "validate_non_blank"))]
    pub title: String,
    #[validate(custom(function = "validate_non_blank"))]
    pub content: String,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5."))]
    pub rating: i32,
}

#[derive(Deserialize, Debug, Default)]
pub struct ReviewPatch {
    pub movie: Option<Uuid>,
    pub user_name: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub rating: Option<i32>,
}

impl ReviewPatch {
    pub fn apply(self, review: &Review) -> ReviewPayload {
        ReviewPayload {
            movie: self.movie.unwrap_or(review.movie_id),
            user_name: self.user_name.unwrap_or_else(|| review.user_name.clone()),
            title: self.title.unwrap_or_else(|| review.title.clone()),
            content: self.content.unwrap_or_else(|| review.content.clone()),
            rating: self.rating.unwrap_or(review.rating),
        }
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct ReviewFilter {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub movie_id: Option<Uuid>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct HelpfulCount {
    pub helpful_count: i64,
}
