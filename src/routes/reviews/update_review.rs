use actix_web::{
    web::{Data, Json, Path},
    HttpResponse,
};
use chrono::Utc;
use sqlx::PgPool;
use tracing::Instrument;
use uuid::Uuid;

use super::{
    fetch_review, review_details, validate_review, Review, ReviewPatch, ReviewPayload,
    REVIEW_COLUMNS,
};
use crate::error::{ApiError, ApiResult};

pub async fn update_review(
    connection: Data<PgPool>,
    path: Path<Uuid>,
    body: Json<ReviewPayload>,
) -> ApiResult<HttpResponse> {
    let payload = body.into_inner();
    save_review(connection, path.into_inner(), move |_| payload).await
}

pub async fn partial_update_review(
    connection: Data<PgPool>,
    path: Path<Uuid>,
    body: Json<ReviewPatch>,
) -> ApiResult<HttpResponse> {
    let patch = body.into_inner();
    save_review(connection, path.into_inner(), move |review| patch.apply(review)).await
}

/// `helpful_count` and `created_at` are never taken from the payload. Moving a
/// review to another movie moves its comments along.
async fn save_review(
    connection: Data<PgPool>,
    review_id: Uuid,
    build: impl FnOnce(&Review) -> ReviewPayload,
) -> ApiResult<HttpResponse> {
    let mut transaction = connection.begin().await?;
    let current = fetch_review(&mut transaction, review_id, true).await?;
    let payload = build(&current);
    validate_review(&mut transaction, &payload).await?;

    let query_span = tracing::info_span!("Updating review", %review_id, ?payload);
    let review = sqlx::query_as::<_, Review>(&format!(
        r#"
            UPDATE reviews
            SET movie_id = $2, user_name = $3, title = $4, content = $5, rating = $6,
                updated_at = $7
            WHERE id = $1
            RETURNING {REVIEW_COLUMNS}
        "#
    ))
    .bind(review_id)
    .bind(payload.movie)
    .bind(&payload.user_name)
    .bind(&payload.title)
    .bind(&payload.content)
    .bind(payload.rating)
    .bind(Utc::now())
    .fetch_one(&mut *transaction)
    .instrument(query_span)
    .await?;

    if review.movie_id != current.movie_id {
        // Comments on a review always share its movie.
        sqlx::query("UPDATE comments SET movie_id = $2 WHERE review_id = $1")
            .bind(review_id)
            .bind(review.movie_id)
            .execute(&mut *transaction)
            .await?;
    }
    transaction.commit().await?;
    tracing::info!("Review updated successfully");

    let details = review_details(connection.get_ref(), vec![review])
        .await?
        .pop()
        .ok_or(ApiError::NotFound)?;
    Ok(HttpResponse::Ok().json(details))
}
