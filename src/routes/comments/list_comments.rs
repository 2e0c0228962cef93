use actix_web::{
    web::{Data, Query},
    HttpResponse,
};
use sqlx::PgPool;
use tracing::Instrument;

use super::{Comment, CommentFilter, CommentScope, COMMENT_COLUMNS};
use crate::error::ApiResult;

pub async fn list_comments(
    connection: Data<PgPool>,
    filter: Query<CommentFilter>,
) -> ApiResult<HttpResponse> {
    let query_span = tracing::info_span!("List comments", ?filter);

    let (movie_id, review_id) = match filter.scope() {
        CommentScope::All => (None, None),
        CommentScope::Movie(movie_id) => (Some(movie_id), None),
        CommentScope::Review(review_id) => (None, Some(review_id)),
    };
    let comments = sqlx::query_as::<_, Comment>(&format!(
        r#"
            SELECT {COMMENT_COLUMNS} FROM comments
            WHERE ($1::uuid IS NULL OR movie_id = $1)
            AND ($2::uuid IS NULL OR review_id = $2)
            ORDER BY created_at DESC
        "#
    ))
    .bind(movie_id)
    .bind(review_id)
    .fetch_all(connection.get_ref())
    .instrument(query_span)
    .await?;

    Ok(HttpResponse::Ok().json(comments))
}
