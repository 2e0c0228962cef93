use actix_web::{
    web::{Data, Path},
    HttpResponse,
};
use sqlx::PgPool;
use uuid::Uuid;

use super::fetch_rating;
use crate::error::ApiResult;

pub async fn get_rating(connection: Data<PgPool>, path: Path<Uuid>) -> ApiResult<HttpResponse> {
    let rating_id = path.into_inner();
    tracing::info!("Get rating {}", rating_id);

    let mut db = connection.acquire().await?;
    let rating = fetch_rating(&mut db, rating_id, false).await?;
    Ok(HttpResponse::Ok().json(rating))
}
