mod memory_repository;
mod postgres_repository;


pub use memory_repository::create_memory_repository;
pub use postgres_repository::{connect_with_retry, create_postgres_repository};
