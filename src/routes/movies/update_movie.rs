use actix_web::{
    web::{Data, Json, Path},
    HttpResponse,
};
use sqlx::PgPool;
use tracing::Instrument;
use uuid::Uuid;

use super::{
    duplicate_movie, fetch_movie, movie_details, validate_movie, Movie, MoviePatch, MoviePayload,
    MOVIE_COLUMNS,
};
use crate::error::{ApiError, ApiResult};

/// `PUT`, every field is replaced.
pub async fn update_movie(
    connection: Data<PgPool>,
    path: Path<Uuid>,
    body: Json<MoviePayload>,
) -> ApiResult<HttpResponse> {
    let payload = body.into_inner();
    save_movie(connection, path.into_inner(), move |_| payload).await
}

/// `PATCH`, missing fields keep their stored value.
pub async fn partial_update_movie(
    connection: Data<PgPool>,
    path: Path<Uuid>,
    body: Json<MoviePatch>,
) -> ApiResult<HttpResponse> {
    let patch = body.into_inner();
    save_movie(connection, path.into_inner(), move |movie| patch.apply(movie)).await
}

async fn save_movie(
    connection: Data<PgPool>,
    movie_id: Uuid,
    build: impl FnOnce(&Movie) -> MoviePayload,
) -> ApiResult<HttpResponse> {
    let mut transaction = connection.begin().await?;
    let current = fetch_movie(&mut transaction, movie_id, true).await?;
    let payload = build(&current);
    validate_movie(&mut transaction, &payload, Some(movie_id)).await?;

    let query_span = tracing::info_span!("Updating movie", %movie_id, ?payload);
    let movie = sqlx::query_as::<_, Movie>(&format!(
        r#"
            UPDATE movies
            SET title = $2, director = $3, release_year = $4, rating = $5
            WHERE id = $1
            RETURNING {MOVIE_COLUMNS}
        "#
    ))
    .bind(movie_id)
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
    tracing::info!("Movie updated successfully");

    let details = movie_details(connection.get_ref(), vec![movie])
        .await?
        .pop()
        .ok_or(ApiError::NotFound)?;
    Ok(HttpResponse::Ok().json(details))
}
