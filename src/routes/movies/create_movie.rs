use actix_web::{
    web::{Data, Json},
    HttpResponse,
};
use sqlx::PgPool;
use tracing::Instrument;
use uuid::Uuid;

use super::{duplicate_movie, validate_movie, Movie, MovieDetails, MoviePayload, MOVIE_COLUMNS};
use crate::error::{ApiError, ApiResult};

pub async fn create_movie(
    connection: Data<PgPool>,
    body: Json<MoviePayload>,
) -> ApiResult<HttpResponse> {
    let payload = body.into_inner();
    let query_span = tracing::info_span!("Saving new movie in the database", ?payload);

    let mut transaction = connection.begin().await?;
    validate_movie(&mut transaction, &payload, None).await?;

    let movie = sqlx::query_as::<_, Movie>(&format!(
        r#"
            INSERT INTO movies ({MOVIE_COLUMNS})
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {MOVIE_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(&payload.title)
    .bind(&payload.director)
    .bind(payload.release_year)
    .bind(payload.rating)
    .fetch_one(&mut *transaction)
    .instrument(query_span)
    .await
    .map_err(|err| {
        if ApiError::is_unique_violation(&err) {
            duplicate_movie()
        } else {
            err.into()
        }
    })?;
    transaction.commit().await?;
    tracing::info!("Movie created successfully");

    Ok(HttpResponse::Created().json(MovieDetails {
        movie,
        reviews: Vec::new(),
        ratings: Vec::new(),
        average_user_rating: 0.0,
    }))
}
