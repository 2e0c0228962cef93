use actix_web::{
    web::{Data, Query},
    HttpResponse,
};
use sqlx::PgPool;
use tracing::Instrument;

use super::{review_details, Review, ReviewFilter, REVIEW_COLUMNS};
use crate::error::ApiResult;

pub async fn list_reviews(
    connection: Data<PgPool>,
    filter: Query<ReviewFilter>,
) -> ApiResult<HttpResponse> {
    let query_span = tracing::info_span!("List reviews", ?filter);

    let reviews = sqlx::query_as::<_, Review>(&format!(
        r#"
            SELECT {REVIEW_COLUMNS} FROM reviews
            WHERE ($1::uuid IS NULL OR movie_id = $1)
            ORDER BY created_at DESC
        "#
    ))
    .bind(filter.movie_id)
    .fetch_all(connection.get_ref())
    .instrument(query_span)
    .await?;

    Ok(HttpResponse::Ok().json(review_details(connection.get_ref(), reviews).await?))
}
