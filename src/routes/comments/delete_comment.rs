use actix_web::{
    web::{Data, Path},
    HttpResponse,
};
use sqlx::PgPool;
use tracing::Instrument;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

pub async fn delete_comment(
    connection: Data<PgPool>,
    path: Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let comment_id = path.into_inner();
    let query_span = tracing::info_span!("Delete user comment", %comment_id);

    let res = sqlx::query("DELETE FROM comments WHERE id = $1")
        .bind(comment_id)
        .execute(connection.get_ref())
        .instrument(query_span)
        .await?;

    if res.rows_affected() > 0 {
        tracing::info!("Comment delete successfully");
        Ok(HttpResponse::NoContent().finish())
    } else {
        tracing::info!("Comment not found in the database");
        Err(ApiError::NotFound)
    }
}
