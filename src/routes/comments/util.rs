use actix_web::{web, Scope};
use sqlx::{PgConnection, PgPool};
use tracing::Instrument;
use uuid::Uuid;
use validator::Validate;

use super::{
    create_comment, delete_comment, get_comment, list_comments, partial_update_comment,
    update_comment, Comment, CommentPayload, COMMENT_COLUMNS,
};
use crate::error::{ApiError, ApiResult, FieldErrors};
use crate::routes::check_movie_reference;

pub const FOREIGN_REVIEW_MESSAGE: &str = "Review does not belong to the selected movie.";

pub fn comment_source() -> Scope {
    web::scope("/comments")
        .route("", web::get().to(list_comments))
        .route("", web::post().to(create_comment))
        .route("/{id}", web::get().to(get_comment))
        .route("/{id}", web::put().to(update_comment))
        .route("/{id}", web::patch().to(partial_update_comment))
        .route("/{id}", web::delete().to(delete_comment))
}

/// A comment may only point at a review of its own movie. The review row is
/// share locked so a concurrent move to another movie waits for this comment.
pub async fn validate_comment(
    connection: &mut PgConnection,
    payload: &CommentPayload,
) -> ApiResult<()> {
    let mut errors: FieldErrors = match payload.validate() {
        Ok(()) => FieldErrors::new(),
        Err(err) => err.into(),
    };
    check_movie_reference(connection, payload.movie, "movie", &mut errors).await?;

    if let Some(review_id) = payload.review {
        let review_movie =
            sqlx::query_scalar::<_, Uuid>("SELECT movie_id FROM reviews WHERE id = $1 FOR SHARE")
                .bind(review_id)
                .fetch_optional(&mut *connection)
                .await?;
        match review_movie {
            None => errors.add(
                "review",
                format!("Invalid pk \"{}\" - object does not exist.", review_id),
            ),
            Some(movie_id) if movie_id != payload.movie => {
                errors.add("review", FOREIGN_REVIEW_MESSAGE)
            }
            Some(_) => {}
        }
    }
    errors.into_result()
}

pub async fn fetch_comment(
    connection: &mut PgConnection,
    id: Uuid,
    lock: bool,
) -> ApiResult<Comment> {
    let query = if lock {
        format!("SELECT {COMMENT_COLUMNS} FROM comments WHERE id = $1 FOR UPDATE")
    } else {
        format!("SELECT {COMMENT_COLUMNS} FROM comments WHERE id = $1")
    };
    sqlx::query_as::<_, Comment>(&query)
        .bind(id)
        .fetch_optional(&mut *connection)
        .await?
        .ok_or(ApiError::NotFound)
}

pub async fn fetch_comments_for_reviews(
    connection: &PgPool,
    review_ids: &[Uuid],
) -> ApiResult<Vec<Comment>> {
    let query_span = tracing::info_span!("Fetch comments of reviews", count = review_ids.len());
    let comments = sqlx::query_as::<_, Comment>(&format!(
        "SELECT {COMMENT_COLUMNS} FROM comments WHERE review_id = ANY($1) ORDER BY created_at DESC"
    ))
    .bind(review_ids)
    .fetch_all(connection)
    .instrument(query_span)
    .await?;
    Ok(comments)
}

#[cfg(test)]
mod tests {
    use super::super::{CommentFilter, CommentPatch, CommentScope};
    use super::*;

    #[test]
    fn empty_movie_filter_falls_back_to_review_filter() {
        let review_id = Uuid::new_v4();
        let query = format!("movie_id=&review_id={}", review_id);
        let filter = actix_web::web::Query::<CommentFilter>::from_query(&query).unwrap();
        assert_eq!(filter.scope(), CommentScope::Review(review_id));

        let filter =
            actix_web::web::Query::<CommentFilter>::from_query("movie_id=&review_id=").unwrap();
        assert_eq!(filter.scope(), CommentScope::All);
    }

    #[test]
    fn movie_filter_takes_precedence_over_review_filter() {
        let movie_id = Uuid::new_v4();
        let review_id = Uuid::new_v4();

        let both = CommentFilter {
            movie_id: Some(movie_id),
            review_id: Some(review_id),
        };
        assert_eq!(both.scope(), CommentScope::Movie(movie_id));

        let review_only = CommentFilter {
            movie_id: None,
            review_id: Some(review_id),
        };
        assert_eq!(review_only.scope(), CommentScope::Review(review_id));

        assert_eq!(CommentFilter::default().scope(), CommentScope::All);
    }

    #[test]
    fn patch_can_detach_review() {
        let stored = Comment {
            id: Uuid::new_v4(),
            movie_id: Uuid::new_v4(),
            review_id: Some(Uuid::new_v4()),
            user_name: "Anonymous".to_string(),
            content: "Loved the ending".to_string(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };

        let untouched: CommentPatch = serde_json::from_str(r#"{"content": "Edited"}"#).unwrap();
        let merged = untouched.apply(&stored);
        assert_eq!(merged.review, stored.review_id);
        assert_eq!(merged.content, "Edited");

        let detached: CommentPatch = serde_json::from_str(r#"{"review": null}"#).unwrap();
        assert_eq!(detached.apply(&stored).review, None);
    }

    #[test]
    fn blank_comment_is_rejected() {
        let payload = CommentPayload {
            movie: Uuid::new_v4(),
            review: None,
            user_name: "Anonymous".to_string(),
            content: "   ".to_string(),
        };
        let errors = FieldErrors::from(payload.validate().unwrap_err());
        assert!(errors.get("content").is_some());
    }
}
