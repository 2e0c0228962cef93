use actix_web::{
    web::{Data, Json, Path},
    HttpResponse,
};
use chrono::Utc;
use sqlx::PgPool;
use tracing::Instrument;
use uuid::Uuid;

use super::{
    fetch_comment, validate_comment, Comment, CommentPatch, CommentPayload, COMMENT_COLUMNS,
};
use crate::error::ApiResult;

pub async fn update_comment(
    connection: Data<PgPool>,
    path: Path<Uuid>,
    body: Json<CommentPayload>,
) -> ApiResult<HttpResponse> {
    let payload = body.into_inner();
    save_comment(connection, path.into_inner(), move |_| payload).await
}

pub async fn partial_update_comment(
    connection: Data<PgPool>,
    path: Path<Uuid>,
    body: Json<CommentPatch>,
) -> ApiResult<HttpResponse> {
    let patch = body.into_inner();
    save_comment(connection, path.into_inner(), move |comment| patch.apply(comment)).await
}

async fn save_comment(
    connection: Data<PgPool>,
    comment_id: Uuid,
    build: impl FnOnce(&Comment) -> CommentPayload,
) -> ApiResult<HttpResponse> {
    let mut transaction = connection.begin().await?;
    let current = fetch_comment(&mut transaction, comment_id, true).await?;
    let payload = build(&current);
    validate_comment(&mut transaction, &payload).await?;

    let query_span = tracing::info_span!("Updating comment", %comment_id, ?payload);
    let comment = sqlx::query_as::<_, Comment>(&format!(
        r#"
            UPDATE comments
            SET movie_id = $2, review_id = $3, user_name = $4, content = $5, updated_at = $6
            WHERE id = $1
            RETURNING {COMMENT_COLUMNS}
        "#
    ))
    .bind(comment_id)
    .bind(payload.movie)
    .bind(payload.review)
    .bind(&payload.user_name)
    .bind(&payload.content)
    .bind(Utc::now())
    .fetch_one(&mut *transaction)
    .instrument(query_span)
    .await?;
    transaction.commit().await?;
    tracing::info!("Comment updated successfully");

    Ok(HttpResponse::Ok().json(comment))
}
