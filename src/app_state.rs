//! Application state management.
//!
//! This module defines the shared state structure that gets passed to all
//! Axum handlers via the `State` extractor. The `AppState` holds the catalog
//! repository, the session store, the metrics implementation and the
//! per-request storage timeout.
//!
//! The state is cheap to clone (`Arc` internally) so it can be handed to each
//! request handler without copying resources.

use crate::domain::{MetricsPtr, RepositoryPtr, SessionStorePtr};
use std::time::Duration;

/// Shared application state passed to all Axum handlers.
///
/// This struct serves as the Dependency Injection container for the application.
/// Handlers depend on the `Repository` and `SessionStore` abstractions, never on
/// a concrete backend. State is built once at startup and never mutated.
///
/// # Lifecycle
///
/// 1. Created once in `create_app_state()` during application startup
/// 2. Attached to the Axum router via `.with_state(app_state)`
/// 3. Cloned automatically by Axum for each incoming HTTP request
/// 4. Handlers extract via `State(state): State<AppState>`
#[derive(Clone)]
pub struct AppState {
    /// Catalog persistence (genres, movies, reviews).
    repository: RepositoryPtr,

    /// Bearer-token sessions consulted by the authentication middleware.
    sessions: SessionStorePtr,

    /// Metrics implementation, Prometheus or no-op.
    metrics: MetricsPtr,

    /// Upper bound on every repository call made while serving a request.
    db_timeout: Duration,
}

impl AppState {
    // ---

    pub fn new(
        repository: RepositoryPtr,
        sessions: SessionStorePtr,
        metrics: MetricsPtr,
        db_timeout: Duration,
    ) -> Self {
        // ---
        AppState {
            repository,
            sessions,
            metrics,
            db_timeout,
        }
    }

    /// Get a reference to the repository implementation.
    pub(crate) fn repository(&self) -> &RepositoryPtr {
        // ---
        &self.repository
    }

    /// Get a reference to the session store.
    pub fn sessions(&self) -> &SessionStorePtr {
        // ---
        &self.sessions
    }

    /// Get a reference to the metrics implementation.
    pub(crate) fn metrics(&self) -> &MetricsPtr {
        // ---
        &self.metrics
    }

    /// Get the per-request storage timeout.
    pub(crate) fn db_timeout(&self) -> Duration {
        // ---
        self.db_timeout
    }
}
