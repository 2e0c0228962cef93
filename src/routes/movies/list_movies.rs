use actix_web::{web::Data, HttpResponse};
use sqlx::PgPool;
use tracing::Instrument;

use super::{movie_details, Movie, MOVIE_COLUMNS};
use crate::error::ApiResult;

pub async fn list_movies(connection: Data<PgPool>) -> ApiResult<HttpResponse> {
    let query_span = tracing::info_span!("List movies");

    let movies = sqlx::query_as::<_, Movie>(&format!(
        "SELECT {MOVIE_COLUMNS} FROM movies ORDER BY title, release_year"
    ))
    .fetch_all(connection.get_ref())
    .instrument(query_span)
    .await?;

    Ok(HttpResponse::Ok().json(movie_details(connection.get_ref(), movies).await?))
}
