use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::util::{default_user_name, double_option, empty_as_none, validate_non_blank};

pub const COMMENT_COLUMNS: &str =
    "id, movie_id, review_id, user_name, content, created_at, updated_at";

#[derive(Serialize, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Comment {
    pub id: Uuid,
    #[serde(rename = "movie")]
    pub movie_id: Uuid,
    #[serde(rename = "review")]
    pub review_id: Option<Uuid>,
    pub user_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Validate, Debug, Clone)]
pub struct CommentPayload {
    pub movie: Uuid,
    #[serde(default)]
    pub review: Option<Uuid>,
    #[serde(default = "default_user_name")]
    #[validate(length(
        min = 1,
        max = 100,
        message = "User name must be between 1 and 100 characters long."
    ), custom(function = "validate_non_blank"))]
    pub user_name: String,
    #[validate(custom(function = "validate_non_blank"))]
    pub content: String,
}

#[derive(Deserialize, Debug, Default)]
pub struct CommentPatch {
    pub movie: Option<Uuid>,
    /// `null` detaches the comment from its review.
    #[serde(default, deserialize_with = "double_option")]
    pub review: Option<Option<Uuid>>,
    pub user_name: Option<String>,
    pub content: Option<String>,
}

impl CommentPatch {
    pub fn apply(self, comment: &Comment) -> CommentPayload {
        CommentPayload {
            movie: self.movie.unwrap_or(comment.movie_id),
            review: self.review.unwrap_or(comment.review_id),
            user_name: self.user_name.unwrap_or_else(|| comment.user_name.clone()),
            content: self.content.unwrap_or_else(|| comment.content.clone()),
        }
    }
}

/// `movie_id` wins when both are given.
#[derive(Deserialize, Debug, Default)]
pub struct CommentFilter {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub movie_id: Option<Uuid>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub review_id: Option<Uuid>,
}

#[derive(Debug, PartialEq)]
pub enum CommentScope {
    All,
    Movie(Uuid),
    Review(Uuid),
}

impl CommentFilter {
    pub fn scope(&self) -> CommentScope {
        match (self.movie_id, self.review_id) {
            (Some(movie_id), _) => CommentScope::Movie(movie_id),
            (None, Some(review_id)) => CommentScope::Review(review_id),
            (None, None) => CommentScope::All,
        }
    }
}
