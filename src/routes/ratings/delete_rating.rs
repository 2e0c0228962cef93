use actix_web::{
    web::{Data, Path},
    HttpResponse,
};
use sqlx::PgPool;
use tracing::Instrument;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

pub async fn delete_rating(connection: Data<PgPool>, path: Path<Uuid>) -> ApiResult<HttpResponse> {
    let rating_id = path.into_inner();
    let query_span = tracing::info_span!("Delete rating", %rating_id);

    let res = sqlx::query("DELETE FROM ratings WHERE id = $1")
        .bind(rating_id)
        .execute(connection.get_ref())
        .instrument(query_span)
        .await?;

    if res.rows_affected() > 0 {
        tracing::info!("Rating deleted successfully");
        Ok(HttpResponse::NoContent().finish())
    } else {
        tracing::info!("Rating not found in the database");
        Err(ApiError::NotFound)
    }
}
