use actix_web::{
    web::{Data, Json},
    HttpResponse,
};
use chrono::Utc;
use sqlx::PgPool;
use tracing::Instrument;
use uuid::Uuid;

use super::{validate_comment, Comment, CommentPayload, COMMENT_COLUMNS};
use crate::error::ApiResult;

pub async fn create_comment(
    connection: Data<PgPool>,
    body: Json<CommentPayload>,
) -> ApiResult<HttpResponse> {
    let payload = body.into_inner();
    let query_span = tracing::info_span!("Save user Comment", ?payload);

    let mut transaction = connection.begin().await?;
    validate_comment(&mut transaction, &payload).await?;

    let now = Utc::now();
    let comment = sqlx::query_as::<_, Comment>(&format!(
        r#"
            INSERT INTO comments ({COMMENT_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING {COMMENT_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(payload.movie)
    .bind(payload.review)
    .bind(&payload.user_name)
    .bind(&payload.content)
    .bind(now)
    .fetch_one(&mut *transaction)
    .instrument(query_span)
    .await?;
    transaction.commit().await?;
    tracing::info!("Comment created successfully");

    Ok(HttpResponse::Created().json(comment))
}
