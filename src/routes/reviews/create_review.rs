use actix_web::{
    web::{Data, Json},
    HttpResponse,
};
use chrono::Utc;
use sqlx::PgPool;
use tracing::Instrument;
use uuid::Uuid;

use super::{validate_review, Review, ReviewDetails, ReviewPayload, REVIEW_COLUMNS};
use crate::error::ApiResult;

pub async fn create_review(
    connection: Data<PgPool>,
    body: Json<ReviewPayload>,
) -> ApiResult<HttpResponse> {
    let payload = body.into_inner();
    let query_span = tracing::info_span!("Saving new review in the database", ?payload);

    let mut transaction = connection.begin().await?;
    validate_review(&mut transaction, &payload).await?;

    let now = Utc::now();
    let review = sqlx::query_as::<_, Review>(&format!(
        r#"
            INSERT INTO reviews ({REVIEW_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, 0, $7, $7)
            RETURNING {REVIEW_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(payload.movie)
    .bind(&payload.user_name)
    .bind(&payload.title)
    .bind(&payload.content)
    .bind(payload.rating)
    .bind(now)
    .fetch_one(&mut *transaction)
    .instrument(query_span)
    .await?;
    transaction.commit().await?;
    tracing::info!("Review created successfully");

    Ok(HttpResponse::Created().json(ReviewDetails {
        review,
        comments: Vec::new(),
    }))
}
