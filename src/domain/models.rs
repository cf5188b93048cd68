use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A movie genre.
///
/// `genre_id` is a string copy of `id`, written once at creation time and used
/// by every lookup that arrives through a URL path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    // ---
    pub id: Uuid,
    pub genre_id: String,
    pub name: String,
    pub creator_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Genre {
    // ---
    pub fn new(name: String, creator_id: String) -> Self {
        // ---
        let id = Uuid::new_v4();
        let now = Utc::now();
        Self {
            id,
            genre_id: id.to_string(),
            name,
            creator_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Editable movie fields, shared by create and edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieFields {
    // ---
    pub name: String,
    pub topic: String,
    pub genre_id: String,
    pub movie_url: String,
}

/// A catalog movie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    // ---
    pub id: Uuid,
    pub movie_id: String,
    #[serde(flatten)]
    pub fields: MovieFields,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Movie {
    // ---
    pub fn new(fields: MovieFields) -> Self {
        // ---
        let id = Uuid::new_v4();
        let now = Utc::now();
        Self {
            id,
            movie_id: id.to_string(),
            fields,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A reviewer's free-text opinion of a movie. Reviews are never edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    // ---
    pub id: Uuid,
    pub movie_id: String,
    pub reviewer_id: String,
    pub review: String,
}

impl Review {
    // ---
    pub fn new(movie_id: String, reviewer_id: String, review: String) -> Self {
        // ---
        Self {
            id: Uuid::new_v4(),
            movie_id,
            reviewer_id,
            review,
        }
    }
}

/// Result of a write that can collide with a uniqueness rule or miss its target.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOutcome<T> {
    // ---
    /// The write went through; carries the stored document.
    Written(T),
    /// No document matched the key.
    Missing,
    /// Another document already holds the unique value.
    Conflict,
}
