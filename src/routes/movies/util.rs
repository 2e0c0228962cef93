use std::collections::HashMap;

use actix_web::{web, Scope};
use sqlx::{PgConnection, PgPool};
use tracing::Instrument;
use uuid::Uuid;
use validator::Validate;

use super::{
    create_movie, delete_movie, get_average_rating, get_movie, list_movies, partial_update_movie,
    update_movie, Movie, MovieDetails, MoviePayload, MOVIE_COLUMNS,
};
use crate::error::{ApiError, ApiResult, FieldErrors};
use crate::routes::{fetch_ratings_for_movies, fetch_reviews_for_movies, Rating};
use crate::util::current_year;

pub const DUPLICATE_MOVIE_MESSAGE: &str =
    "The fields title, director, release_year must make a unique set.";

pub fn movie_source() -> Scope {
    web::scope("/movies")
        .route("", web::get().to(list_movies))
        .route("", web::post().to(create_movie))
        .route("/{id}", web::get().to(get_movie))
        .route("/{id}", web::put().to(update_movie))
        .route("/{id}", web::patch().to(partial_update_movie))
        .route("/{id}", web::delete().to(delete_movie))
        .route("/{id}/average_rating", web::get().to(get_average_rating))
}

/// Arithmetic mean of the given ratings, `0.0` when there are none.
pub fn average_of(ratings: impl IntoIterator<Item = i32>) -> f64 {
    let (sum, count) = ratings
        .into_iter()
        .fold((0_i64, 0_u32), |(sum, count), rating| {
            (sum + i64::from(rating), count + 1)
        });
    if count == 0 {
        0.0
    } else {
        sum as f64 / f64::from(count)
    }
}

/// Rules that need neither the database nor anything beyond `this_year`.
pub fn check_movie_fields(payload: &MoviePayload, this_year: i32) -> FieldErrors {
    let mut errors = match payload.validate() {
        Ok(()) => FieldErrors::new(),
        Err(err) => err.into(),
    };
    if payload.release_year > this_year {
        errors.add("release_year", "Release year cannot exceed current year.");
    }
    errors
}

pub fn duplicate_movie() -> ApiError {
    ApiError::field("non_field_errors", DUPLICATE_MOVIE_MESSAGE)
}

/// Field rules plus the (title, director, release_year) uniqueness check.
/// `current` is the id of the movie being updated, which may keep its own triple.
pub async fn validate_movie(
    connection: &mut PgConnection,
    payload: &MoviePayload,
    current: Option<Uuid>,
) -> ApiResult<()> {
    check_movie_fields(payload, current_year()).into_result()?;

    let query_span = tracing::info_span!("Checking movie uniqueness", title = %payload.title);
    let duplicate = sqlx::query_scalar::<_, bool>(
        r#"
            SELECT EXISTS(
                SELECT 1 FROM movies
                WHERE title = $1 AND director = $2 AND release_year = $3
                AND ($4::uuid IS NULL OR id <> $4)
            )
        "#,
    )
    .bind(&payload.title)
    .bind(&payload.director)
    .bind(payload.release_year)
    .bind(current)
    .fetch_one(&mut *connection)
    .instrument(query_span)
    .await?;

    if duplicate {
        tracing::info!("Movie triple already taken");
        return Err(duplicate_movie());
    }
    Ok(())
}

/// Reports a missing movie as a validation error on `field`. The movie row stays
/// key-share locked until the transaction ends, so it can't be deleted before
/// the referencing row is written.
pub async fn check_movie_reference(
    connection: &mut PgConnection,
    movie_id: Uuid,
    field: &str,
    errors: &mut FieldErrors,
) -> ApiResult<()> {
    let exists = sqlx::query_scalar::<_, i32>("SELECT 1 FROM movies WHERE id = $1 FOR KEY SHARE")
        .bind(movie_id)
        .fetch_optional(&mut *connection)
        .await?
        .is_some();
    if !exists {
        errors.add(
            field,
            format!("Invalid pk \"{}\" - object does not exist.", movie_id),
        );
    }
    Ok(())
}

pub async fn fetch_movie(connection: &mut PgConnection, id: Uuid, lock: bool) -> ApiResult<Movie> {
    let query = if lock {
        format!("SELECT {MOVIE_COLUMNS} FROM movies WHERE id = $1 FOR UPDATE")
    } else {
        format!("SELECT {MOVIE_COLUMNS} FROM movies WHERE id = $1")
    };
    sqlx::query_as::<_, Movie>(&query)
        .bind(id)
        .fetch_optional(&mut *connection)
        .await?
        .ok_or(ApiError::NotFound)
}

/// Embeds reviews (with their comments) and ratings into each movie, fetching
/// every nested collection with one query instead of one per movie.
pub async fn movie_details(connection: &PgPool, movies: Vec<Movie>) -> ApiResult<Vec<MovieDetails>> {
    if movies.is_empty() {
        return Ok(Vec::new());
    }
    let ids = movies.iter().map(|movie| movie.id).collect::<Vec<_>>();

    let mut reviews = HashMap::<Uuid, Vec<_>>::new();
    for review in fetch_reviews_for_movies(connection, &ids).await? {
        reviews.entry(review.review.movie_id).or_default().push(review);
    }
    let mut ratings = HashMap::<Uuid, Vec<Rating>>::new();
    for rating in fetch_ratings_for_movies(connection, &ids).await? {
        ratings.entry(rating.movie_id).or_default().push(rating);
    }

    Ok(movies
        .into_iter()
        .map(|movie| {
            let ratings = ratings.remove(&movie.id).unwrap_or_default();
            MovieDetails {
                reviews: reviews.remove(&movie.id).unwrap_or_default(),
                average_user_rating: average_of(ratings.iter().map(|rating| rating.rating)),
                ratings,
                movie,
            }
        })
        .collect())
}
