use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

/// Abstraction for ephemeral session storage.
///
/// Values are opaque strings (serialized session records) stored under a key
/// with a time-to-live. Expired keys read back as `None`.
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    // ---
    /// Store `value` under `key`, expiring after `ttl`.
    async fn put(&self, key: &str, value: String, ttl: Duration) -> Result<()>;

    /// Fetch the value stored under `key`, if still live.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Remove `key`. Missing keys are not an error.
    async fn remove(&self, key: &str) -> Result<()>;

    /// Confirm the backing store is reachable.
    async fn ping(&self) -> Result<()>;
}

/// Type alias for any backend that implements SessionStore.
pub type SessionStorePtr = Arc<dyn SessionStore>;
