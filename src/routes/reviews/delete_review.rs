use actix_web::{
    web::{Data, Path},
    HttpResponse,
};
use sqlx::PgPool;
use tracing::Instrument;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

pub async fn delete_review(connection: Data<PgPool>, path: Path<Uuid>) -> ApiResult<HttpResponse> {
    let review_id = path.into_inner();
    let query_span = tracing::info_span!("Delete review", %review_id);

    let res = sqlx::query("DELETE FROM reviews WHERE id = $1")
        .bind(review_id)
        .execute(connection.get_ref())
        .instrument(query_span)
        .await?;

    if res.rows_affected() > 0 {
        tracing::info!("Review deleted successfully");
        Ok(HttpResponse::NoContent().finish())
    } else {
        tracing::info!("Review not found in the database");
        Err(ApiError::NotFound)
    }
}
