use actix_web::{
    web::{Data, Json, Path},
    HttpResponse,
};
use sqlx::PgPool;
use tracing::Instrument;
use uuid::Uuid;

use super::{fetch_rating, validate_rating, Rating, RatingPatch, RatingPayload, RATING_COLUMNS};
use crate::error::ApiResult;

pub async fn update_rating(
    connection: Data<PgPool>,
    path: Path<Uuid>,
    body: Json<RatingPayload>,
) -> ApiResult<HttpResponse> {
    let payload = body.into_inner();
    save_rating(connection, path.into_inner(), move |_| payload).await
}

pub async fn partial_update_rating(
    connection: Data<PgPool>,
    path: Path<Uuid>,
    body: Json<RatingPatch>,
) -> ApiResult<HttpResponse> {
    let patch = body.into_inner();
    save_rating(connection, path.into_inner(), move |rating| patch.apply(rating)).await
}

async fn save_rating(
    connection: Data<PgPool>,
    rating_id: Uuid,
    build: impl FnOnce(&Rating) -> RatingPayload,
) -> ApiResult<HttpResponse> {
    let mut transaction = connection.begin().await?;
    let current = fetch_rating(&mut transaction, rating_id, true).await?;
    let payload = build(&current);
    validate_rating(&mut transaction, &payload).await?;

    let query_span = tracing::info_span!("Updating rating", %rating_id, ?payload);
    let rating = sqlx::query_as::<_, Rating>(&format!(
        r#"
            UPDATE ratings
            SET movie_id = $2, user_name = $3, rating = $4
            WHERE id = $1
            RETURNING {RATING_COLUMNS}
        "#
    ))
    .bind(rating_id)
    .bind(payload.movie)
    .bind(&payload.user_name)
    .bind(payload.rating)
    .fetch_one(&mut *transaction)
    .instrument(query_span)
    .await?;
    transaction.commit().await?;
    tracing::info!("Rating updated successfully");

    Ok(HttpResponse::Ok().json(rating))
}
