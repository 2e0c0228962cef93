use actix_web::{
    web::{Data, Query},
    HttpResponse,
};
use sqlx::PgPool;
use tracing::Instrument;

use super::{Rating, RatingFilter, RATING_COLUMNS};
use crate::error::ApiResult;

pub async fn list_ratings(
    connection: Data<PgPool>,
    filter: Query<RatingFilter>,
) -> ApiResult<HttpResponse> {
    let query_span = tracing::info_span!("List ratings", ?filter);

    let ratings = sqlx::query_as::<_, Rating>(&format!(
        r#"
            SELECT {RATING_COLUMNS} FROM ratings
            WHERE ($1::uuid IS NULL OR movie_id = $1)
            ORDER BY created_at DESC
        "#
    ))
    .bind(filter.movie_id)
    .fetch_all(connection.get_ref())
    .instrument(query_span)
    .await?;

    Ok(HttpResponse::Ok().json(ratings))
}
