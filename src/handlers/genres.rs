//! Genre handlers.
//!
//! Genres are addressed by their denormalized `genre_id`. Only admins may
//! create them; any authenticated caller may read, list, rename or delete.

use crate::app_state::AppState;
use crate::domain::{Genre, ListParams, PageWindow, WriteOutcome};
use crate::handlers::error::{bounded, CatalogError};
use crate::handlers::shared_types::{Envelope, Notice};
use crate::session::{SessionInfo, ROLE_ADMIN};
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /genres/creategenre`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateGenreRequest {
    #[validate(required, length(min = 4, max = 100))]
    pub name: Option<String>,

    #[validate(required, length(min = 1))]
    pub creator_id: Option<String>,
}

/// Body of `PUT /genres/editgenre/{genre_id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct EditGenreRequest {
    #[validate(required, length(min = 4, max = 100))]
    pub name: Option<String>,
}

/// One page of genres.
#[derive(Debug, Serialize)]
pub struct GenreListing {
    pub total_count: u64,
    pub genre_items: Vec<Genre>,
}

/// Handler for creating a genre (POST /genres/creategenre).
///
/// Order of checks: admin role, body decode, case-insensitive duplicate name,
/// field validation, insert. A malformed name that is also a duplicate is
/// therefore reported as a duplicate.
///
/// - `201 Created` with the stored genre on success.
/// - `400 Bad Request` for a missing role, bad JSON, a duplicate name (with
///   `count`) or a failed validation.
/// - `500 Internal Server Error` if storage fails.
#[tracing::instrument(skip_all)]
pub async fn create_genre(
    State(state): State<AppState>,
    Extension(session): Extension<SessionInfo>,
    payload: Result<Json<CreateGenreRequest>, JsonRejection>,
) -> Result<(StatusCode, Envelope<Genre>), CatalogError> {
    // ---
    session.require_role(ROLE_ADMIN)?;
    let Json(body) = payload?;

    if let Some(name) = body.name.as_deref() {
        let count = bounded(
            &state,
            "error occurred while checking for the name",
            state.repository().count_genres_named(name),
        )
        .await?;

        if count > 0 {
            return Err(CatalogError::Duplicate {
                resource: "genre",
                count,
            });
        }
    }

    body.validate()?;

    let CreateGenreRequest {
        name: Some(name),
        creator_id: Some(creator_id),
    } = body
    else {
        return Err(CatalogError::Decode("name and creator_id are required".to_string()));
    };

    let outcome = bounded(
        &state,
        "Genre was not created",
        state.repository().insert_genre(Genre::new(name, creator_id)),
    )
    .await?;

    match outcome {
        WriteOutcome::Written(genre) => {
            tracing::info!(genre_id = %genre.genre_id, "Created genre {}", genre.name);
            state.metrics().record_genre_created();
            Ok((StatusCode::CREATED, Envelope::success(StatusCode::CREATED, genre)))
        }
        // Lost a race with a concurrent create of the same name.
        WriteOutcome::Conflict => Err(CatalogError::Duplicate {
            resource: "genre",
            count: 1,
        }),
        WriteOutcome::Missing => Err(CatalogError::Database("Genre was not created")),
    }
}

/// Handler for fetching one genre (GET /genres/{genre_id}).
///
/// Responds `404 Not Found` when no genre carries that id.
#[tracing::instrument(skip(state))]
pub async fn get_genre(
    State(state): State<AppState>,
    Path(genre_id): Path<String>,
) -> Result<Envelope<Genre>, CatalogError> {
    // ---
    let genre = bounded(
        &state,
        "error occurred while fetching the genre",
        state.repository().get_genre(&genre_id),
    )
    .await?
    .ok_or(CatalogError::NotFound("genre not found"))?;

    Ok(Envelope::success(StatusCode::OK, genre))
}

/// Handler for listing genres (GET /genres/getgenres).
///
/// Query: `recordPerPage` (default 10), `page` (default 1) and an optional
/// `startIndex` that overrides the page offset. An empty collection yields
/// `total_count: 0` and no items.
#[tracing::instrument(skip(state))]
pub async fn list_genres(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Envelope<GenreListing>, CatalogError> {
    // ---
    let window = PageWindow::from_params(&params);

    let page = bounded(
        &state,
        "error occurred while fetching genres",
        state.repository().list_genres(window),
    )
    .await?;

    Ok(Envelope::success(
        StatusCode::OK,
        GenreListing {
            total_count: page.total_count,
            genre_items: page.items,
        },
    ))
}

/// Handler for renaming a genre (PUT /genres/editgenre/{genre_id}).
///
/// Returns the updated genre when exactly one genre matched, `404` when none
/// did, and `400` when the new name is invalid or taken by another genre.
#[tracing::instrument(skip(state, payload))]
pub async fn edit_genre(
    State(state): State<AppState>,
    Path(genre_id): Path<String>,
    payload: Result<Json<EditGenreRequest>, JsonRejection>,
) -> Result<Envelope<Genre>, CatalogError> {
    // ---
    let Json(body) = payload?;
    body.validate()?;

    let Some(name) = body.name else {
        return Err(CatalogError::Decode("name is required".to_string()));
    };

    let outcome = bounded(
        &state,
        "Something went wrong while updating the genre",
        state
            .repository()
            .rename_genre(&genre_id, &name, chrono::Utc::now()),
    )
    .await?;

    match outcome {
        WriteOutcome::Written(genre) => Ok(Envelope::success(StatusCode::OK, genre)),
        WriteOutcome::Missing => Err(CatalogError::NotFound("genre not found")),
        WriteOutcome::Conflict => Err(CatalogError::Duplicate {
            resource: "genre",
            count: 1,
        }),
    }
}

/// Handler for deleting a genre (DELETE /genres/{genre_id}).
#[tracing::instrument(skip(state))]
pub async fn delete_genre(
    State(state): State<AppState>,
    Path(genre_id): Path<String>,
) -> Result<Envelope<Notice>, CatalogError> {
    // ---
    let deleted = bounded(
        &state,
        "error occurred while deleting the genre",
        state.repository().delete_genre(&genre_id),
    )
    .await?;

    if deleted == 0 {
        return Err(CatalogError::NotFound("Genre with specified ID not found!"));
    }

    Ok(Envelope::success(
        StatusCode::OK,
        Notice {
            data: "Genre was successfully deleted!",
        },
    ))
}
