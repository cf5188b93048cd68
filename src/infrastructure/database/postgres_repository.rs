use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use uuid::Uuid;

use crate::config::DatabaseConfig;
use crate::domain::{
    Genre, Movie, MovieFields, Page, PageWindow, Repository, Review, WriteOutcome,
};

const GENRE_COLUMNS: &str = "id, genre_id, name, creator_id, created_at, updated_at";
const MOVIE_COLUMNS: &str =
    "id, movie_id, name, topic, genre_id, movie_url, created_at, updated_at";
const REVIEW_COLUMNS: &str = "id, movie_id, reviewer_id, review";

#[derive(sqlx::FromRow)]
struct GenreRow {
    id: Uuid,
    genre_id: String,
    name: String,
    creator_id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<GenreRow> for Genre {
    fn from(r: GenreRow) -> Self {
        // ---
        Genre {
            id: r.id,
            genre_id: r.genre_id,
            name: r.name,
            creator_id: r.creator_id,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct MovieRow {
    id: Uuid,
    movie_id: String,
    name: String,
    topic: String,
    genre_id: String,
    movie_url: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<MovieRow> for Movie {
    fn from(r: MovieRow) -> Self {
        // ---
        Movie {
            id: r.id,
            movie_id: r.movie_id,
            fields: MovieFields {
                name: r.name,
                topic: r.topic,
                genre_id: r.genre_id,
                movie_url: r.movie_url,
            },
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ReviewRow {
    id: Uuid,
    movie_id: String,
    reviewer_id: String,
    review: String,
}

impl From<ReviewRow> for Review {
    fn from(r: ReviewRow) -> Self {
        // ---
        Review {
            id: r.id,
            movie_id: r.movie_id,
            reviewer_id: r.reviewer_id,
            review: r.review,
        }
    }
}

/// PostgreSQL SQLSTATE for unique constraint violations.
fn is_unique_violation(err: &sqlx::Error) -> bool {
    // ---
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some("23505"),
        _ => false,
    }
}

fn to_i64(value: u64) -> i64 {
    // ---
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Connects to PostgreSQL, retrying while the server comes up, then applies
/// pending migrations.
pub async fn connect_with_retry(config: &DatabaseConfig) -> Result<PgPool> {
    // ---
    let options = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout);

    let mut attempt = 0;
    let pool = loop {
        attempt += 1;
        match options.clone().connect(&config.database_url).await {
            Ok(pool) => break pool,
            Err(err) if attempt < config.retry_count => {
                tracing::warn!(attempt, "Database not ready: {}", err);
                tokio::time::sleep(Duration::from_secs(1)).await;
            }
            Err(err) => {
                return Err(anyhow::anyhow!(
                    "Database unavailable after {attempt} attempts: {err}"
                ))
            }
        }
    };

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database ready after {} attempt(s)", attempt);

    Ok(pool)
}

pub fn create_postgres_repository(pool: PgPool) -> impl Repository {
    // ---
    PostgresRepository::new(pool)
}

pub struct PostgresRepository {
    // ---
    pool: PgPool,
}

impl PostgresRepository {
    // ---
    pub fn new(pool: PgPool) -> Self {
        // ---
        Self { pool }
    }

    async fn count(&self, table: &str) -> Result<u64> {
        // ---
        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&self.pool)
            .await?;

        Ok(u64::try_from(total).unwrap_or(0))
    }
}

#[async_trait::async_trait]
impl Repository for PostgresRepository {
    // ---
    async fn ping(&self) -> Result<()> {
        // ---
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn count_genres_named(&self, name: &str) -> Result<u64> {
        // ---
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM genres WHERE lower(name) = lower($1)")
                .bind(name)
                .fetch_one(&self.pool)
                .await?;

        Ok(u64::try_from(count).unwrap_or(0))
    }

    async fn insert_genre(&self, genre: Genre) -> Result<WriteOutcome<Genre>> {
        // ---
        let result = sqlx::query(
            "INSERT INTO genres (id, genre_id, name, creator_id, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(genre.id)
        .bind(&genre.genre_id)
        .bind(&genre.name)
        .bind(&genre.creator_id)
        .bind(genre.created_at)
        .bind(genre.updated_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(WriteOutcome::Written(genre)),
            Err(err) if is_unique_violation(&err) => Ok(WriteOutcome::Conflict),
            Err(err) => Err(err.into()),
        }
    }

    async fn get_genre(&self, genre_id: &str) -> Result<Option<Genre>> {
        // ---
        let row = sqlx::query_as::<_, GenreRow>(&format!(
            "SELECT {GENRE_COLUMNS} FROM genres WHERE genre_id = $1"
        ))
        .bind(genre_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Genre::from))
    }

    async fn list_genres(&self, window: PageWindow) -> Result<Page<Genre>> {
        // ---
        let total_count = self.count("genres").await?;

        let rows = sqlx::query_as::<_, GenreRow>(&format!(
            "SELECT {GENRE_COLUMNS} FROM genres
             ORDER BY created_at, id OFFSET $1 LIMIT $2"
        ))
        .bind(to_i64(window.start))
        .bind(to_i64(window.limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(Page {
            total_count,
            items: rows.into_iter().map(Genre::from).collect(),
        })
    }

    async fn rename_genre(
        &self,
        genre_id: &str,
        name: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<WriteOutcome<Genre>> {
        // ---
        let result = sqlx::query_as::<_, GenreRow>(&format!(
            "UPDATE genres SET name = $2, updated_at = $3 WHERE genre_id = $1
             RETURNING {GENRE_COLUMNS}"
        ))
        .bind(genre_id)
        .bind(name)
        .bind(updated_at)
        .fetch_optional(&self.pool)
        .await;

        match result {
            Ok(Some(row)) => Ok(WriteOutcome::Written(row.into())),
            Ok(None) => Ok(WriteOutcome::Missing),
            Err(err) if is_unique_violation(&err) => Ok(WriteOutcome::Conflict),
            Err(err) => Err(err.into()),
        }
    }

    async fn delete_genre(&self, genre_id: &str) -> Result<u64> {
        // ---
        let result = sqlx::query("DELETE FROM genres WHERE genre_id = $1")
            .bind(genre_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn insert_movie(&self, movie: Movie) -> Result<Movie> {
        // ---
        sqlx::query(
            "INSERT INTO movies (id, movie_id, name, topic, genre_id, movie_url, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(movie.id)
        .bind(&movie.movie_id)
        .bind(&movie.fields.name)
        .bind(&movie.fields.topic)
        .bind(&movie.fields.genre_id)
        .bind(&movie.fields.movie_url)
        .bind(movie.created_at)
        .bind(movie.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(movie)
    }

    async fn get_movie(&self, movie_id: &str) -> Result<Option<Movie>> {
        // ---
        let row = sqlx::query_as::<_, MovieRow>(&format!(
            "SELECT {MOVIE_COLUMNS} FROM movies WHERE movie_id = $1"
        ))
        .bind(movie_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Movie::from))
    }

    async fn list_movies(&self, window: PageWindow) -> Result<Page<Movie>> {
        // ---
        let total_count = self.count("movies").await?;

        let rows = sqlx::query_as::<_, MovieRow>(&format!(
            "SELECT {MOVIE_COLUMNS} FROM movies
             ORDER BY created_at, id OFFSET $1 LIMIT $2"
        ))
        .bind(to_i64(window.start))
        .bind(to_i64(window.limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(Page {
            total_count,
            items: rows.into_iter().map(Movie::from).collect(),
        })
    }

    async fn update_movie(
        &self,
        movie_id: &str,
        fields: MovieFields,
        updated_at: DateTime<Utc>,
    ) -> Result<WriteOutcome<Movie>> {
        // ---
        let row = sqlx::query_as::<_, MovieRow>(&format!(
            "UPDATE movies
             SET name = $2, topic = $3, genre_id = $4, movie_url = $5, updated_at = $6
             WHERE movie_id = $1
             RETURNING {MOVIE_COLUMNS}"
        ))
        .bind(movie_id)
        .bind(&fields.name)
        .bind(&fields.topic)
        .bind(&fields.genre_id)
        .bind(&fields.movie_url)
        .bind(updated_at)
        .fetch_optional(&self.pool)
        .await?;

        Ok(match row {
            Some(row) => WriteOutcome::Written(row.into()),
            None => WriteOutcome::Missing,
        })
    }

    async fn delete_movie(&self, movie_id: &str) -> Result<u64> {
        // ---
        let result = sqlx::query("DELETE FROM movies WHERE movie_id = $1")
            .bind(movie_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn search_movies(&self, fragment: &str) -> Result<Vec<Movie>> {
        // ---
        let rows = sqlx::query_as::<_, MovieRow>(&format!(
            "SELECT {MOVIE_COLUMNS} FROM movies WHERE strpos(name, $1) > 0
             ORDER BY created_at, id"
        ))
        .bind(fragment)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Movie::from).collect())
    }

    async fn insert_review(&self, review: Review) -> Result<Review> {
        // ---
        sqlx::query(
            "INSERT INTO reviews (id, movie_id, reviewer_id, review) VALUES ($1, $2, $3, $4)",
        )
        .bind(review.id)
        .bind(&review.movie_id)
        .bind(&review.reviewer_id)
        .bind(&review.review)
        .execute(&self.pool)
        .await?;

        Ok(review)
    }

    async fn delete_review(&self, id: Uuid) -> Result<u64> {
        // ---
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn reviews_by_movie(&self, fragment: &str) -> Result<Vec<Review>> {
        // ---
        let rows = sqlx::query_as::<_, ReviewRow>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE strpos(movie_id, $1) > 0
             ORDER BY created_at, id"
        ))
        .bind(fragment)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Review::from).collect())
    }

    async fn reviews_by_reviewer(&self, fragment: &str) -> Result<Vec<Review>> {
        // ---
        let rows = sqlx::query_as::<_, ReviewRow>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE strpos(reviewer_id, $1) > 0
             ORDER BY created_at, id"
        ))
        .bind(fragment)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Review::from).collect())
    }
}
