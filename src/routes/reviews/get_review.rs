use actix_web::{
    web::{Data, Path},
    HttpResponse,
};
use sqlx::PgPool;
use uuid::Uuid;

use super::{fetch_review, review_details};
use crate::error::{ApiError, ApiResult};

pub async fn get_review(connection: Data<PgPool>, path: Path<Uuid>) -> ApiResult<HttpResponse> {
    let review_id = path.into_inner();
    tracing::info!("Get review {}", review_id);

    let mut db = connection.acquire().await?;
    let review = fetch_review(&mut db, review_id, false).await?;
    drop(db);

    let details = review_details(connection.get_ref(), vec![review])
        .await?
        .pop()
        .ok_or(ApiError::NotFound)?;
    Ok(HttpResponse::Ok().json(details))
}
