//! Review handlers.
//!
//! Reviews are write-once: a `USER` posts one, anyone authenticated can list
//! or delete. Listing matches a fragment of the movie or reviewer id.

use crate::app_state::AppState;
use crate::domain::Review;
use crate::handlers::error::{bounded, CatalogError};
use crate::handlers::shared_types::{Envelope, Notice};
use crate::session::{SessionInfo, ROLE_USER};
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Body of `POST /reviews/addreview`.
#[derive(Debug, Deserialize, Validate)]
pub struct AddReviewRequest {
    #[validate(required, length(min = 1))]
    pub movie_id: Option<String>,

    #[validate(required, length(min = 1))]
    pub reviewer_id: Option<String>,

    #[validate(required, length(min = 1))]
    pub review: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MovieReviewsQuery {
    pub movie_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReviewerReviewsQuery {
    pub reviewer_id: Option<String>,
}

/// Handler for posting a review (POST /reviews/addreview). `USER` role only.
///
/// - `201 Created` with the stored review.
/// - `400 Bad Request` for a missing role, bad JSON or failed validation.
/// - `500 Internal Server Error` if the insert fails.
#[tracing::instrument(skip_all)]
pub async fn add_review(
    State(state): State<AppState>,
    Extension(session): Extension<SessionInfo>,
    payload: Result<Json<AddReviewRequest>, JsonRejection>,
) -> Result<(StatusCode, Envelope<Review>), CatalogError> {
    // ---
    session.require_role(ROLE_USER)?;
    let Json(body) = payload?;
    body.validate()?;

    let AddReviewRequest {
        movie_id: Some(movie_id),
        reviewer_id: Some(reviewer_id),
        review: Some(review),
    } = body
    else {
        return Err(CatalogError::Decode("all review fields are required".to_string()));
    };

    let review = bounded(
        &state,
        "Review was not created",
        state
            .repository()
            .insert_review(Review::new(movie_id, reviewer_id, review)),
    )
    .await?;

    tracing::info!(review_id = %review.id, movie_id = %review.movie_id, "Created review");
    state.metrics().record_review_created();

    Ok((StatusCode::CREATED, Envelope::success(StatusCode::CREATED, review)))
}

/// Handler for deleting a review (DELETE /reviews/{id}).
///
/// The id is the review's primary key. An id that does not parse cannot match
/// anything and is reported as not found.
#[tracing::instrument(skip(state))]
pub async fn delete_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Envelope<Notice>, CatalogError> {
    // ---
    const NOT_FOUND: &str = "Review with specified ID not found!";

    let Ok(review_id) = Uuid::parse_str(&id) else {
        return Err(CatalogError::NotFound(NOT_FOUND));
    };

    let deleted = bounded(
        &state,
        "error occurred while deleting the review",
        state.repository().delete_review(review_id),
    )
    .await?;

    if deleted == 0 {
        return Err(CatalogError::NotFound(NOT_FOUND));
    }

    Ok(Envelope::success(
        StatusCode::OK,
        Notice {
            data: "Your review was successfully deleted!",
        },
    ))
}

/// Handler for a movie's reviews (GET /reviews/movie?movie_id=).
#[tracing::instrument(skip(state))]
pub async fn reviews_for_movie(
    State(state): State<AppState>,
    Query(query): Query<MovieReviewsQuery>,
) -> Result<Envelope<Vec<Review>>, CatalogError> {
    // ---
    let Some(fragment) = query.movie_id.filter(|v| !v.is_empty()) else {
        tracing::info!("No movie id passed");
        return Err(CatalogError::InvalidSearch);
    };

    let reviews = bounded(
        &state,
        "something went wrong in fetching the reviews",
        state.repository().reviews_by_movie(&fragment),
    )
    .await?;

    Ok(Envelope::success(StatusCode::OK, reviews))
}

/// Handler for a reviewer's reviews (GET /reviews/reviewer?reviewer_id=).
#[tracing::instrument(skip(state))]
pub async fn reviews_by_reviewer(
    State(state): State<AppState>,
    Query(query): Query<ReviewerReviewsQuery>,
) -> Result<Envelope<Vec<Review>>, CatalogError> {
    // ---
    let Some(fragment) = query.reviewer_id.filter(|v| !v.is_empty()) else {
        tracing::info!("No reviewer id passed");
        return Err(CatalogError::InvalidSearch);
    };

    let reviews = bounded(
        &state,
        "something went wrong in fetching the reviews",
        state.repository().reviews_by_reviewer(&fragment),
    )
    .await?;

    Ok(Envelope::success(StatusCode::OK, reviews))
}
