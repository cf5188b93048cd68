// Gateway module - controls public API for handlers
// Modules are private, only exported symbols are public

mod auth;
mod error;
mod genres;
mod health;
mod metrics;
mod movies;
mod reviews;
mod root;
mod shared_types;

// Core handlers
pub use health::health_check;
pub use metrics::{metrics_handler, track_requests};
pub use root::root_handler;

// Authentication gate
pub use auth::authenticate;

// Genre handlers
pub use genres::{create_genre, delete_genre, edit_genre, get_genre, list_genres};

// Movie handlers
pub use movies::{create_movie, delete_movie, edit_movie, get_movie, list_movies, search_movies};

// Review handlers
pub use reviews::{add_review, delete_review, reviews_by_reviewer, reviews_for_movie};

// Response and error types
pub use error::CatalogError;
pub use shared_types::Envelope;
