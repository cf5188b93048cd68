use super::models::{Genre, Movie, MovieFields, Review, WriteOutcome};
use super::pagination::{Page, PageWindow};
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

/// Abstraction for catalog persistence.
///
/// Lookups by `genre_id` / `movie_id` use the denormalized string copy, not the
/// primary key. Substring searches match the literal fragment anywhere in the
/// field.
#[async_trait::async_trait]
pub trait Repository: Send + Sync {
    // ---
    /// Confirm the backing store is reachable.
    async fn ping(&self) -> Result<()>;

    // Genres

    /// Count genres whose name equals `name`, ignoring case.
    async fn count_genres_named(&self, name: &str) -> Result<u64>;

    /// Insert a genre. `Conflict` if the name is already taken.
    async fn insert_genre(&self, genre: Genre) -> Result<WriteOutcome<Genre>>;

    /// Get a genre by its denormalized id.
    async fn get_genre(&self, genre_id: &str) -> Result<Option<Genre>>;

    /// List genres in insertion order.
    async fn list_genres(&self, window: PageWindow) -> Result<Page<Genre>>;

    /// Rename a genre and stamp `updated_at`.
    async fn rename_genre(
        &self,
        genre_id: &str,
        name: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<WriteOutcome<Genre>>;

    /// Delete a genre by its denormalized id. Returns the number removed.
    async fn delete_genre(&self, genre_id: &str) -> Result<u64>;

    // Movies

    async fn insert_movie(&self, movie: Movie) -> Result<Movie>;

    async fn get_movie(&self, movie_id: &str) -> Result<Option<Movie>>;

    async fn list_movies(&self, window: PageWindow) -> Result<Page<Movie>>;

    /// Replace a movie's editable fields. `Missing` if no movie matched.
    async fn update_movie(
        &self,
        movie_id: &str,
        fields: MovieFields,
        updated_at: DateTime<Utc>,
    ) -> Result<WriteOutcome<Movie>>;

    async fn delete_movie(&self, movie_id: &str) -> Result<u64>;

    /// Movies whose name contains `fragment`.
    async fn search_movies(&self, fragment: &str) -> Result<Vec<Movie>>;

    // Reviews

    async fn insert_review(&self, review: Review) -> Result<Review>;

    /// Delete a review by primary key. Returns the number removed.
    async fn delete_review(&self, id: Uuid) -> Result<u64>;

    /// Reviews whose `movie_id` contains `fragment`.
    async fn reviews_by_movie(&self, fragment: &str) -> Result<Vec<Review>>;

    /// Reviews whose `reviewer_id` contains `fragment`.
    async fn reviews_by_reviewer(&self, fragment: &str) -> Result<Vec<Review>>;
}

/// Type alias for any backend that implements Repository.
pub type RepositoryPtr = Arc<dyn Repository>;
