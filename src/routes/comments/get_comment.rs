use actix_web::{
    web::{Data, Path},
    HttpResponse,
};
use sqlx::PgPool;
use uuid::Uuid;

use super::fetch_comment;
use crate::error::ApiResult;

pub async fn get_comment(connection: Data<PgPool>, path: Path<Uuid>) -> ApiResult<HttpResponse> {
    let comment_id = path.into_inner();
    tracing::info!("Get comment {}", comment_id);

    let mut db = connection.acquire().await?;
    let comment = fetch_comment(&mut db, comment_id, false).await?;
    Ok(HttpResponse::Ok().json(comment))
}
