mod memory_store;
mod redis_store;

pub use memory_store::create_memory_sessions;
pub use redis_store::create_redis_sessions;
