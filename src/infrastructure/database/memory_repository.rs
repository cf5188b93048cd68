//! In-process repository backed by vectors behind a `RwLock`.
//!
//! Used for local runs without PostgreSQL and by the HTTP integration tests.
//! Documents keep insertion order, which is also the listing order.

use anyhow::Result;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{
    Genre, Movie, MovieFields, Page, PageWindow, Repository, Review, WriteOutcome,
};

#[derive(Default)]
struct Collections {
    genres: Vec<Genre>,
    movies: Vec<Movie>,
    reviews: Vec<Review>,
}

pub fn create_memory_repository() -> impl Repository {
    // ---
    MemoryRepository::new()
}

#[derive(Default)]
pub struct MemoryRepository {
    // ---
    inner: RwLock<Collections>,
}

impl MemoryRepository {
    // ---
    pub fn new() -> Self {
        // ---
        Self::default()
    }
}

fn same_name(a: &str, b: &str) -> bool {
    // ---
    a.to_lowercase() == b.to_lowercase()
}

#[async_trait::async_trait]
impl Repository for MemoryRepository {
    // ---
    async fn ping(&self) -> Result<()> {
        // ---
        Ok(())
    }

    async fn count_genres_named(&self, name: &str) -> Result<u64> {
        // ---
        let data = self.inner.read().await;
        Ok(data.genres.iter().filter(|g| same_name(&g.name, name)).count() as u64)
    }

    async fn insert_genre(&self, genre: Genre) -> Result<WriteOutcome<Genre>> {
        // ---
        // Check and insert under one write lock so concurrent creates cannot both pass.
        let mut data = self.inner.write().await;
        if data.genres.iter().any(|g| same_name(&g.name, &genre.name)) {
            return Ok(WriteOutcome::Conflict);
        }

        data.genres.push(genre.clone());
        Ok(WriteOutcome::Written(genre))
    }

    async fn get_genre(&self, genre_id: &str) -> Result<Option<Genre>> {
        // ---
        let data = self.inner.read().await;
        Ok(data.genres.iter().find(|g| g.genre_id == genre_id).cloned())
    }

    async fn list_genres(&self, window: PageWindow) -> Result<Page<Genre>> {
        // ---
        let data = self.inner.read().await;
        Ok(Page::collect(data.genres.iter().cloned(), window))
    }

    async fn rename_genre(
        &self,
        genre_id: &str,
        name: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<WriteOutcome<Genre>> {
        // ---
        let mut data = self.inner.write().await;

        let Some(index) = data.genres.iter().position(|g| g.genre_id == genre_id) else {
            return Ok(WriteOutcome::Missing);
        };

        let taken = data
            .genres
            .iter()
            .any(|g| g.genre_id != genre_id && same_name(&g.name, name));
        if taken {
            return Ok(WriteOutcome::Conflict);
        }

        let genre = &mut data.genres[index];
        genre.name = name.to_string();
        genre.updated_at = updated_at;

        Ok(WriteOutcome::Written(genre.clone()))
    }

    async fn delete_genre(&self, genre_id: &str) -> Result<u64> {
        // ---
        let mut data = self.inner.write().await;
        let before = data.genres.len();
        data.genres.retain(|g| g.genre_id != genre_id);
        Ok((before - data.genres.len()) as u64)
    }

    async fn insert_movie(&self, movie: Movie) -> Result<Movie> {
        // ---
        self.inner.write().await.movies.push(movie.clone());
        Ok(movie)
    }

    async fn get_movie(&self, movie_id: &str) -> Result<Option<Movie>> {
        // ---
        let data = self.inner.read().await;
        Ok(data.movies.iter().find(|m| m.movie_id == movie_id).cloned())
    }

    async fn list_movies(&self, window: PageWindow) -> Result<Page<Movie>> {
        // ---
        let data = self.inner.read().await;
        Ok(Page::collect(data.movies.iter().cloned(), window))
    }

    async fn update_movie(
        &self,
        movie_id: &str,
        fields: MovieFields,
        updated_at: DateTime<Utc>,
    ) -> Result<WriteOutcome<Movie>> {
        // ---
        let mut data = self.inner.write().await;
        match data.movies.iter_mut().find(|m| m.movie_id == movie_id) {
            Some(movie) => {
                movie.fields = fields;
                movie.updated_at = updated_at;
                Ok(WriteOutcome::Written(movie.clone()))
            }
            None => Ok(WriteOutcome::Missing),
        }
    }

    async fn delete_movie(&self, movie_id: &str) -> Result<u64> {
        // ---
        let mut data = self.inner.write().await;
        let before = data.movies.len();
        data.movies.retain(|m| m.movie_id != movie_id);
        Ok((before - data.movies.len()) as u64)
    }

    async fn search_movies(&self, fragment: &str) -> Result<Vec<Movie>> {
        // ---
        let data = self.inner.read().await;
        Ok(data
            .movies
            .iter()
            .filter(|m| m.fields.name.contains(fragment))
            .cloned()
            .collect())
    }

    async fn insert_review(&self, review: Review) -> Result<Review> {
        // ---
        self.inner.write().await.reviews.push(review.clone());
        Ok(review)
    }

    async fn delete_review(&self, id: Uuid) -> Result<u64> {
        // ---
        let mut data = self.inner.write().await;
        let before = data.reviews.len();
        data.reviews.retain(|r| r.id != id);
        Ok((before - data.reviews.len()) as u64)
    }

    async fn reviews_by_movie(&self, fragment: &str) -> Result<Vec<Review>> {
        // ---
        let data = self.inner.read().await;
        Ok(data
            .reviews
            .iter()
            .filter(|r| r.movie_id.contains(fragment))
            .cloned()
            .collect())
    }

    async fn reviews_by_reviewer(&self, fragment: &str) -> Result<Vec<Review>> {
        // ---
        let data = self.inner.read().await;
        Ok(data
            .reviews
            .iter()
            .filter(|r| r.reviewer_id.contains(fragment))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn movie(name: &str) -> Movie {
        // ---
        Movie::new(MovieFields {
            name: name.to_string(),
            topic: "topic".to_string(),
            genre_id: "g1".to_string(),
            movie_url: "https://example.com".to_string(),
        })
    }

    #[tokio::test]
    async fn genre_names_are_unique_ignoring_case() {
        // ---
        let repo = MemoryRepository::new();

        let first = repo
            .insert_genre(Genre::new("Action".to_string(), "u1".to_string()))
            .await
            .unwrap();
        assert!(matches!(first, WriteOutcome::Written(_)));

        let second = repo
            .insert_genre(Genre::new("ACTION".to_string(), "u2".to_string()))
            .await
            .unwrap();
        assert_eq!(second, WriteOutcome::Conflict);
        assert_eq!(repo.count_genres_named("action").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn concurrent_duplicate_inserts_store_one() {
        // ---
        let repo = std::sync::Arc::new(MemoryRepository::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    repo.insert_genre(Genre::new("Drama".to_string(), format!("u{i}")))
                        .await
                        .unwrap()
                })
            })
            .collect();

        let mut written = 0;
        for handle in handles {
            if let WriteOutcome::Written(_) = handle.await.unwrap() {
                written += 1;
            }
        }

        assert_eq!(written, 1);
        assert_eq!(repo.count_genres_named("drama").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn rename_reports_missing_and_conflict() {
        // ---
        let repo = MemoryRepository::new();
        let WriteOutcome::Written(comedy) = repo
            .insert_genre(Genre::new("Comedy".to_string(), "u1".to_string()))
            .await
            .unwrap()
        else {
            panic!("insert failed");
        };
        repo.insert_genre(Genre::new("Horror".to_string(), "u1".to_string()))
            .await
            .unwrap();

        let outcome = repo.rename_genre("missing", "Whatever", Utc::now()).await.unwrap();
        assert_eq!(outcome, WriteOutcome::Missing);

        let outcome = repo
            .rename_genre(&comedy.genre_id, "horror", Utc::now())
            .await
            .unwrap();
        assert_eq!(outcome, WriteOutcome::Conflict);

        // Re-casing a genre's own name is allowed.
        let outcome = repo
            .rename_genre(&comedy.genre_id, "COMEDY", Utc::now())
            .await
            .unwrap();
        let WriteOutcome::Written(renamed) = outcome else {
            panic!("rename failed");
        };
        assert_eq!(renamed.name, "COMEDY");
        assert_eq!(renamed.created_at, comedy.created_at);
    }

    #[tokio::test]
    async fn review_queries_match_substrings() {
        // ---
        let repo = MemoryRepository::new();
        repo.insert_review(Review::new("m123".into(), "r9".into(), "great".into()))
            .await
            .unwrap();
        repo.insert_review(Review::new("x555".into(), "r10".into(), "meh".into()))
            .await
            .unwrap();

        let found = repo.reviews_by_movie("m1").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].movie_id, "m123");

        let found = repo.reviews_by_reviewer("r1").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].reviewer_id, "r10");

        assert!(repo.reviews_by_movie("zzz").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_review_counts_removed() {
        // ---
        let repo = MemoryRepository::new();
        let review = repo
            .insert_review(Review::new("m1".into(), "r1".into(), "ok".into()))
            .await
            .unwrap();

        assert_eq!(repo.delete_review(review.id).await.unwrap(), 1);
        assert_eq!(repo.delete_review(review.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn movies_list_and_search() {
        // ---
        let repo = MemoryRepository::new();
        for name in ["Alien", "Aliens", "Heat"] {
            repo.insert_movie(movie(name)).await.unwrap();
        }

        let page = repo.list_movies(PageWindow::new(1, 10)).await.unwrap();
        assert_eq!(page.total_count, 3);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].fields.name, "Aliens");

        let found = repo.search_movies("Alien").await.unwrap();
        assert_eq!(found.len(), 2);
    }
}
