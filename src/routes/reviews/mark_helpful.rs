use actix_web::{
    web::{Data, Path},
    HttpResponse,
};
use sqlx::PgPool;
use tracing::Instrument;
use uuid::Uuid;

use super::HelpfulCount;
use crate::error::{ApiError, ApiResult};

/// Bumps `helpful_count` in one statement so concurrent calls cannot lose an increment.
pub async fn mark_helpful(connection: Data<PgPool>, path: Path<Uuid>) -> ApiResult<HttpResponse> {
    let review_id = path.into_inner();
    let query_span = tracing::info_span!("Mark review helpful", %review_id);

    let helpful_count = sqlx::query_scalar::<_, i64>(
        r#"
            UPDATE reviews SET helpful_count = helpful_count + 1
            WHERE id = $1
            RETURNING helpful_count
        "#,
    )
    .bind(review_id)
    .fetch_optional(connection.get_ref())
    .instrument(query_span)
    .await?
    .ok_or(ApiError::NotFound)?;

    tracing::info!("Review now has {} helpful votes", helpful_count);
    Ok(HttpResponse::Ok().json(HelpfulCount { helpful_count }))
}
