use actix_web::{web::Data, HttpResponse};
use serde::Serialize;
use sqlx::PgPool;
use tracing::Instrument;

use super::{Movie, MOVIE_COLUMNS};
use crate::error::ApiResult;

const RECENT_MOVIES: i64 = 5;

#[derive(Serialize, Debug)]
pub struct Summary {
    pub total_movies: i64,
    pub recent_movies: Vec<Movie>,
}

/// Landing summary: how many movies exist and the latest releases.
pub async fn handler(connection: Data<PgPool>) -> ApiResult<HttpResponse> {
    let query_span = tracing::info_span!("Landing summary");

    let total_movies = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM movies")
        .fetch_one(connection.get_ref())
        .instrument(query_span.clone())
        .await?;
    let recent_movies = sqlx::query_as::<_, Movie>(&format!(
        "SELECT {MOVIE_COLUMNS} FROM movies ORDER BY release_year DESC, title LIMIT $1"
    ))
    .bind(RECENT_MOVIES)
    .fetch_all(connection.get_ref())
    .instrument(query_span)
    .await?;

    Ok(HttpResponse::Ok().json(Summary {
        total_movies,
        recent_movies,
    }))
}
