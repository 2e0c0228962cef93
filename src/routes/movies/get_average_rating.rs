use actix_web::{
    web::{Data, Path},
    HttpResponse,
};
use sqlx::PgPool;
use tracing::Instrument;
use uuid::Uuid;

use super::{average_of, fetch_movie, AverageRating};
use crate::error::ApiResult;

pub async fn get_average_rating(
    connection: Data<PgPool>,
    path: Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let movie_id = path.into_inner();
    let query_span = tracing::info_span!("Average movie rating", %movie_id);

    let mut db = connection.acquire().await?;
    fetch_movie(&mut db, movie_id, false).await?;

    let ratings = sqlx::query_scalar::<_, i32>("SELECT rating FROM ratings WHERE movie_id = $1")
        .bind(movie_id)
        .fetch_all(&mut *db)
        .instrument(query_span)
        .await?;

    Ok(HttpResponse::Ok().json(AverageRating {
        movie_id,
        average_rating: average_of(ratings),
    }))
}
