use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::routes::{Rating, ReviewDetails};
use crate::util::validate_non_blank;

pub const MOVIE_COLUMNS: &str = "id, title, director, release_year, rating";

#[derive(Serialize, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Movie {
    pub id: Uuid,
    pub title: String,
    pub director: String,
    pub release_year: i32,
    pub rating: f64,
}

/// A movie as rendered by the API, with its reviews and ratings embedded.
#[derive(Serialize, Debug)]
pub struct MovieDetails {
    #[serde(flatten)]
    pub movie: Movie,
    pub reviews: Vec<ReviewDetails>,
    pub ratings: Vec<Rating>,
    pub average_user_rating: f64,
}

#[derive(Deserialize, Validate, Debug, Clone)]
pub struct MoviePayload {
    #[validate(length(
        min = 1,
        max = 150,
        message = "Title must be between 1 and 150 characters long."
    ), custom(function = "validate_non_blank"))]
    pub title: String,
    #[validate(length(
        min = 1,
        max = 100,
        message = "Director must be between 1 and 100 characters long."
    ), custom(function = "validate_non_blank"))]
    pub director: String,
    pub release_year: i32,
    #[validate(range(min = 1.0, max = 5.0, message = "Rating must be between 1 and 5."))]
    pub rating: f64,
}

#[derive(Deserialize, Debug, Default)]
pub struct MoviePatch {
    pub title: Option<String>,
    pub director: Option<String>,
    pub release_year: Option<i32>,
    pub rating: Option<f64>,
}

impl MoviePatch {
    pub fn apply(self, movie: &Movie) -> MoviePayload {
        MoviePayload {
            title: self.title.unwrap_or_else(|| movie.title.clone()),
            director: self.director.unwrap_or_else(|| movie.director.clone()),
            release_year: self.release_year.unwrap_or(movie.release_year),
            rating: self.rating.unwrap_or(movie.rating),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct AverageRating {
    pub movie_id: Uuid,
    pub average_rating: f64,
}
