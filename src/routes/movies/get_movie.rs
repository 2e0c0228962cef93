use actix_web::{
    web::{Data, Path},
    HttpResponse,
};
use sqlx::PgPool;
use uuid::Uuid;

use super::{fetch_movie, movie_details};
use crate::error::{ApiError, ApiResult};

pub async fn get_movie(connection: Data<PgPool>, path: Path<Uuid>) -> ApiResult<HttpResponse> {
    let movie_id = path.into_inner();
    tracing::info!("Get movie {}", movie_id);

    let mut db = connection.acquire().await?;
    let movie = fetch_movie(&mut db, movie_id, false).await?;
    drop(db);

    let details = movie_details(connection.get_ref(), vec![movie])
        .await?
        .pop()
        .ok_or(ApiError::NotFound)?;
    Ok(HttpResponse::Ok().json(details))
}
