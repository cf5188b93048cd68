use anyhow::Result;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::domain::SessionStore;

pub fn create_memory_sessions() -> impl SessionStore {
    // ---
    MemorySessionStore::default()
}

/// In-process session store. Expiry is enforced lazily on read.
#[derive(Default)]
pub struct MemorySessionStore {
    // ---
    entries: RwLock<HashMap<String, (String, Instant)>>,
}

#[async_trait::async_trait]
impl SessionStore for MemorySessionStore {
    // ---
    async fn put(&self, key: &str, value: String, ttl: Duration) -> Result<()> {
        // ---
        let expires_at = Instant::now() + ttl;
        self.entries
            .write()
            .await
            .insert(key.to_string(), (value, expires_at));
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        // ---
        let mut entries = self.entries.write().await;
        match entries.get(key) {
            Some((_, expires_at)) if *expires_at <= Instant::now() => {
                entries.remove(key);
                Ok(None)
            }
            Some((value, _)) => Ok(Some(value.clone())),
            None => Ok(None),
        }
    }

    async fn remove(&self, key: &str) -> Result<()> {
        // ---
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        // ---
        Ok(())
    }
}
