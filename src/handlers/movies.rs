use crate::app_state::AppState;
use crate::domain::{ListParams, Movie, MovieFields, PageWindow, WriteOutcome};
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

/// Body of movie create and edit requests.
#[derive(Debug, Deserialize, Validate)]
pub struct MovieRequest {
    #[validate(required, length(min = 2, max = 100))]
    pub name: Option<String>,

    #[validate(required, length(min = 1))]
    pub topic: Option<String>,

    #[validate(required, length(min = 1))]
    pub genre_id: Option<String>,

    #[validate(required, length(min = 1))]
    pub movie_url: Option<String>,
}

impl MovieRequest {
    // ---
    /// Validates and converts into the stored field set.
    fn into_fields(self) -> Result<MovieFields, CatalogError> {
        // ---
        self.validate()?;

        match self {
            MovieRequest {
                name: Some(name),
                topic: Some(topic),
                genre_id: Some(genre_id),
                movie_url: Some(movie_url),
            } => Ok(MovieFields {
                name,
                topic,
                genre_id,
                movie_url,
            }),
            _ => Err(CatalogError::Decode("all movie fields are required".to_string())),
        }
    }
}

/// One page of movies.
#[derive(Debug, Serialize)]
pub struct MovieListing {
    pub total_count: u64,
    pub movie_items: Vec<Movie>,
}

#[derive(Debug, Deserialize)]
pub struct MovieSearch {
    pub name: Option<String>,
}

/// Handler for creating a movie (POST /movies/createmovie). Admin only.
///
/// - `201 Created` with the stored movie.
/// - `400 Bad Request` for a missing role, bad JSON or failed validation.
#[tracing::instrument(skip_all)]
pub async fn create_movie(
    State(state): State<AppState>,
    Extension(session): Extension<SessionInfo>,
    payload: Result<Json<MovieRequest>, JsonRejection>,
) -> Result<(StatusCode, Envelope<Movie>), CatalogError> {
    // ---
    session.require_role(ROLE_ADMIN)?;
    let Json(body) = payload?;
    let fields = body.into_fields()?;

    let movie = bounded(
        &state,
        "Movie was not created",
        state.repository().insert_movie(Movie::new(fields)),
    )
    .await?;

    tracing::info!(movie_id = %movie.movie_id, "Created movie {}", movie.fields.name);
    state.metrics().record_movie_created();

    Ok((StatusCode::CREATED, Envelope::success(StatusCode::CREATED, movie)))
}

/// Handler for fetching a movie by its id (GET /movies/{movie_id}).
///
/// - If the movie exists, responds with `200 OK` and the movie.
/// - If it does not, responds with `404 Not Found`.
#[tracing::instrument(skip(state))]
pub async fn get_movie(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
) -> Result<Envelope<Movie>, CatalogError> {
    // ---
    let movie = bounded(
        &state,
        "error occurred while fetching the movie",
        state.repository().get_movie(&movie_id),
    )
    .await?
    .ok_or(CatalogError::NotFound("movie not found"))?;

    Ok(Envelope::success(StatusCode::OK, movie))
}

/// Handler for listing movies (GET /movies/getmovies).
///
/// Takes the same paging parameters as the genre listing.
#[tracing::instrument(skip(state))]
pub async fn list_movies(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Envelope<MovieListing>, CatalogError> {
    // ---
    let window = PageWindow::from_params(&params);

    let page = bounded(
        &state,
        "error occurred while fetching movies",
        state.repository().list_movies(window),
    )
    .await?;

    Ok(Envelope::success(
        StatusCode::OK,
        MovieListing {
            total_count: page.total_count,
            movie_items: page.items,
        },
    ))
}

/// Handler for searching movies by name fragment (GET /movies/search?name=).
///
/// A missing or empty `name` is `404 Invalid Search Index`; no match is an
/// empty list.
#[tracing::instrument(skip(state))]
pub async fn search_movies(
    State(state): State<AppState>,
    Query(search): Query<MovieSearch>,
) -> Result<Envelope<Vec<Movie>>, CatalogError> {
    // ---
    let Some(fragment) = search.name.filter(|n| !n.is_empty()) else {
        tracing::info!("No movie name passed");
        return Err(CatalogError::InvalidSearch);
    };

    let movies = bounded(
        &state,
        "something went wrong in fetching the movies",
        state.repository().search_movies(&fragment),
    )
    .await?;

    Ok(Envelope::success(StatusCode::OK, movies))
}

/// Handler for replacing a movie's fields (PUT /movies/editmovie/{movie_id}). Admin only.
///
/// Responds `404 Not Found` if no movie carries that id.
#[tracing::instrument(skip(state, session, payload))]
pub async fn edit_movie(
    State(state): State<AppState>,
    Extension(session): Extension<SessionInfo>,
    Path(movie_id): Path<String>,
    payload: Result<Json<MovieRequest>, JsonRejection>,
) -> Result<Envelope<Movie>, CatalogError> {
    // ---
    session.require_role(ROLE_ADMIN)?;
    let Json(body) = payload?;
    let fields = body.into_fields()?;

    let outcome = bounded(
        &state,
        "Something went wrong while updating the movie",
        state
            .repository()
            .update_movie(&movie_id, fields, chrono::Utc::now()),
    )
    .await?;

    match outcome {
        WriteOutcome::Written(movie) => Ok(Envelope::success(StatusCode::OK, movie)),
        WriteOutcome::Missing | WriteOutcome::Conflict => {
            Err(CatalogError::NotFound("movie not found"))
        }
    }
}

/// Delete a movie by its id (DELETE /movies/{movie_id}). Admin only.
///
/// Returns:
/// - `200 OK` if the movie was deleted.
/// - `404 Not Found` if no movie exists with the given id.
/// - `500 Internal Server Error` on a storage failure.
#[tracing::instrument(skip(state, session))]
pub async fn delete_movie(
    State(state): State<AppState>,
    Extension(session): Extension<SessionInfo>,
    Path(movie_id): Path<String>,
) -> Result<Envelope<Notice>, CatalogError> {
    // ---
    session.require_role(ROLE_ADMIN)?;

    let deleted = bounded(
        &state,
        "error occurred while deleting the movie",
        state.repository().delete_movie(&movie_id),
    )
    .await?;

    if deleted == 0 {
        return Err(CatalogError::NotFound("Movie with specified ID not found!"));
    }

    Ok(Envelope::success(
        StatusCode::OK,
        Notice {
            data: "Movie was successfully deleted!",
        },
    ))
}
