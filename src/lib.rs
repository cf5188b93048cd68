// src/lib.rs
use anyhow::Result;
use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use handlers::*;

// Public exports (visible outside this module)
pub mod domain;

// Internal-only exports (sibling access within this module)
mod app_state;
mod config;
mod handlers;
mod infrastructure;
mod session;

// Hoist up only the public symbol(s)
pub use app_state::AppState;
pub use handlers::{CatalogError, Envelope};
pub use session::{
    create_session, revoke_session, validate_session, SessionInfo, ROLE_ADMIN, ROLE_USER,
};

pub use config::*;

// Publicly expose the infrastructure creation functions
pub use infrastructure::{
    connect_with_retry, // ---
    create_memory_repository,
    create_memory_sessions,
    create_noop_metrics,
    create_postgres_repository,
    create_prom_metrics,
    create_redis_sessions,
};

/// Builds the application state from configuration: repository, session
/// store and metrics backend.
pub async fn create_app_state(config: &AppConfig) -> Result<AppState> {
    // ---
    let metrics = match config.metrics {
        MetricsKind::Prometheus => create_prom_metrics()?,
        MetricsKind::Noop => create_noop_metrics()?,
    };

    let repository: domain::RepositoryPtr = match &config.storage {
        StorageConfig::Postgres(db) => {
            let pool = connect_with_retry(db).await?;
            Arc::new(create_postgres_repository(pool))
        }
        StorageConfig::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on restart");
            Arc::new(create_memory_repository())
        }
    };

    let sessions: domain::SessionStorePtr = match &config.sessions {
        SessionConfig::Redis(redis) => Arc::new(create_redis_sessions(&redis.url)?),
        SessionConfig::Memory => Arc::new(create_memory_sessions()),
    };

    Ok(AppState::new(
        repository,
        sessions,
        metrics,
        config.server.db_timeout,
    ))
}

/// Build the HTTP router around an already assembled [`AppState`].
///
/// Resource routes sit behind the authentication middleware; `/`, `/health`
/// and `/metrics` do not.
pub fn build_router(app_state: AppState) -> Router {
    // ---
    let genres = Router::new()
        .route("/creategenre", post(create_genre))
        .route("/getgenres", get(list_genres))
        .route("/editgenre/{genre_id}", put(edit_genre))
        .route("/{genre_id}", get(get_genre).delete(delete_genre));

    let movies = Router::new()
        .route("/createmovie", post(create_movie))
        .route("/getmovies", get(list_movies))
        .route("/search", get(search_movies))
        .route("/editmovie/{movie_id}", put(edit_movie))
        .route("/{movie_id}", get(get_movie).delete(delete_movie));

    let reviews = Router::new()
        .route("/addreview", post(add_review))
        .route("/movie", get(reviews_for_movie))
        .route("/reviewer", get(reviews_by_reviewer))
        .route("/{id}", delete(delete_review));

    let protected = Router::new()
        .nest("/genres", genres)
        .nest("/movies", movies)
        .nest("/reviews", reviews)
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            authenticate,
        ));

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .merge(protected)
        .layer(middleware::from_fn_with_state(
            app_state.clone(),
            track_requests,
        ))
        .with_state(app_state)
}

/// Initialise the global tracing subscriber (`RUST_LOG`, default `info`).
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    // ---
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).try_init().ok(); // Ignores if already initialized
}
