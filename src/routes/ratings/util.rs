use actix_web::{web, Scope};
use sqlx::{PgConnection, PgPool};
use tracing::Instrument;
use uuid::Uuid;
use validator::Validate;

use super::{
    create_rating, delete_rating, get_rating, list_ratings, partial_update_rating, update_rating,
    Rating, RatingPayload, RATING_COLUMNS,
};
use crate::error::{ApiError, ApiResult, FieldErrors};
use crate::routes::check_movie_reference;

pub fn rating_source() -> Scope {
    web::scope("/ratings")
        .route("", web::get().to(list_ratings))
        .route("", web::post().to(create_rating))
        .route("/{id}", web::get().to(get_rating))
        .route("/{id}", web::put().to(update_rating))
        .route("/{id}", web::patch().to(partial_update_rating))
        .route("/{id}", web::delete().to(delete_rating))
}

pub async fn validate_rating(
    connection: &mut PgConnection,
    payload: &RatingPayload,
) -> ApiResult<()> {
    let mut errors: FieldErrors = match payload.validate() {
        Ok(()) => FieldErrors::new(),
        Err(err) => err.into(),
    };
    check_movie_reference(connection, payload.movie, "movie", &mut errors).await?;
    errors.into_result()
}

pub async fn fetch_rating(
    connection: &mut PgConnection,
    id: Uuid,
    lock: bool,
) -> ApiResult<Rating> {
    let query = if lock {
        format!("SELECT {RATING_COLUMNS} FROM ratings WHERE id = $1 FOR UPDATE")
    } else {
        format!("SELECT {RATING_COLUMNS} FROM ratings WHERE id = $1")
    };
    sqlx::query_as::<_, Rating>(&query)
        .bind(id)
        .fetch_optional(&mut *connection)
        .await?
        .ok_or(ApiError::NotFound)
}

pub async fn fetch_ratings_for_movies(
    connection: &PgPool,
    movie_ids: &[Uuid],
) -> ApiResult<Vec<Rating>> {
    let query_span = tracing::info_span!("Fetch ratings of movies", count = movie_ids.len());
    let ratings = sqlx::query_as::<_, Rating>(&format!(
        "SELECT {RATING_COLUMNS} FROM ratings WHERE movie_id = ANY($1) ORDER BY created_at DESC"
    ))
    .bind(movie_ids)
    .fetch_all(connection)
    .instrument(query_span)
    .await?;
    Ok(ratings)
}
