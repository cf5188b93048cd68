mod metrics;
mod models;
mod pagination;
mod repository;
mod session_store;

// Publicly expose the Metrics abstraction
pub use metrics::{Metrics, MetricsPtr};

// Catalog documents and persistence
pub use models::{Genre, Movie, MovieFields, Review, WriteOutcome};
pub use pagination::{ListParams, Page, PageWindow, DEFAULT_RECORDS_PER_PAGE};
pub use repository::{Repository, RepositoryPtr};

// Ephemeral session storage
pub use session_store::{SessionStore, SessionStorePtr};
