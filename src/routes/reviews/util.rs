use std::collections::HashMap;

use actix_web::{web, Scope};
use sqlx::{PgConnection, PgPool};
use tracing::Instrument;
use uuid::Uuid;
use validator::Validate;

use super::{
    create_review, delete_review, get_review, list_reviews, mark_helpful, partial_update_review,
    update_review, Review, ReviewDetails, ReviewPayload, REVIEW_COLUMNS,
};
use crate::error::{ApiError, ApiResult, FieldErrors};
use crate::routes::{check_movie_reference, fetch_comments_for_reviews, Comment};

pub fn review_source() -> Scope {
    web::scope("/reviews")
        .route("", web::get().to(list_reviews))
        .route("", web::post().to(create_review))
        .route("/{id}", web::get().to(get_review))
        .route("/{id}", web::put().to(update_review))
        .route("/{id}", web::patch().to(partial_update_review))
        .route("/{id}", web::delete().to(delete_review))
        .route("/{id}/mark_helpful", web::post().to(mark_helpful))
}

pub async fn validate_review(
    connection: &mut PgConnection,
    payload: &ReviewPayload,
) -> ApiResult<()> {
    let mut errors: FieldErrors = match payload.validate() {
        Ok(()) => FieldErrors::new(),
        Err(err) => err.into(),
    };
    check_movie_reference(connection, payload.movie, "movie", &mut errors).await?;
    errors.into_result()
}

pub async fn fetch_review(
    connection: &mut PgConnection,
    id: Uuid,
    lock: bool,
) -> ApiResult<Review> {
    let query = if lock {
        format!("SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = $1 FOR UPDATE")
    } else {
        format!("SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = $1")
    };
    sqlx::query_as::<_, Review>(&query)
        .bind(id)
        .fetch_optional(&mut *connection)
        .await?
        .ok_or(ApiError::NotFound)
}

/// Attaches each review's comments, loaded with a single query.
pub async fn review_details(
    connection: &PgPool,
    reviews: Vec<Review>,
) -> ApiResult<Vec<ReviewDetails>> {
    if reviews.is_empty() {
        return Ok(Vec::new());
    }
    let ids = reviews.iter().map(|review| review.id).collect::<Vec<_>>();

    let mut comments = HashMap::<Uuid, Vec<Comment>>::new();
    for comment in fetch_comments_for_reviews(connection, &ids).await? {
        if let Some(review_id) = comment.review_id {
            comments.entry(review_id).or_default().push(comment);
        }
    }

    Ok(reviews
        .into_iter()
        .map(|review| ReviewDetails {
            comments: comments.remove(&review.id).unwrap_or_default(),
            review,
        })
        .collect())
}

/// Reviews of the given movies, newest first, with their comments.
pub async fn fetch_reviews_for_movies(
    connection: &PgPool,
    movie_ids: &[Uuid],
) -> ApiResult<Vec<ReviewDetails>> {
    let query_span = tracing::info_span!("Fetch reviews of movies", count = movie_ids.len());
    let reviews = sqlx::query_as::<_, Review>(&format!(
        "SELECT {REVIEW_COLUMNS} FROM reviews WHERE movie_id = ANY($1) ORDER BY created_at DESC"
    ))
    .bind(movie_ids)
    .fetch_all(connection)
    .instrument(query_span)
    .await?;
    review_details(connection, reviews).await
}
