use actix_web::{
    web::{Data, Path},
    HttpResponse,
};
use sqlx::PgPool;
use tracing::Instrument;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

/// Reviews, ratings and comments of the movie go with it (`ON DELETE CASCADE`).
pub async fn delete_movie(connection: Data<PgPool>, path: Path<Uuid>) -> ApiResult<HttpResponse> {
    let movie_id = path.into_inner();
    let query_span = tracing::info_span!("Delete movie", %movie_id);

    let res = sqlx::query("DELETE FROM movies WHERE id = $1")
        .bind(movie_id)
        .execute(connection.get_ref())
        .instrument(query_span)
        .await?;

    if res.rows_affected() > 0 {
        tracing::info!("Movie deleted successfully");
        Ok(HttpResponse::NoContent().finish())
    } else {
        tracing::info!("Movie not found in the database");
        Err(ApiError::NotFound)
    }
}
