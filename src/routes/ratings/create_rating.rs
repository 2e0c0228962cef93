use actix_web::{
    web::{Data, Json},
    HttpResponse,
};
use chrono::Utc;
use sqlx::PgPool;
use tracing::Instrument;
use uuid::Uuid;

use super::{validate_rating, Rating, RatingPayload, RATING_COLUMNS};
use crate::error::ApiResult;

pub async fn create_rating(
    connection: Data<PgPool>,
    body: Json<RatingPayload>,
) -> ApiResult<HttpResponse> {
    let payload = body.into_inner();
    let query_span = tracing::info_span!("Saving new rating in the database", ?payload);

    let mut transaction = connection.begin().await?;
    validate_rating(&mut transaction, &payload).await?;

    let rating = sqlx::query_as::<_, Rating>(&format!(
        r#"
            INSERT INTO ratings ({RATING_COLUMNS})
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {RATING_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(payload.movie)
    .bind(&payload.user_name)
    .bind(payload.rating)
    .bind(Utc::now())
    .fetch_one(&mut *transaction)
    .instrument(query_span)
    .await?;
    transaction.commit().await?;
    tracing::info!("Rating created successfully");

    Ok(HttpResponse::Created().json(rating))
}
