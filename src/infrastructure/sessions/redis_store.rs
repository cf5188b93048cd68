use anyhow::Result;
use redis::{AsyncCommands, Client};
use std::time::Duration;

use crate::domain::SessionStore;

/// Creates a Redis-backed session store.
///
/// The client is opened eagerly but no connection is made until first use.
pub fn create_redis_sessions(url: &str) -> Result<impl SessionStore> {
    // ---
    Ok(RedisSessionStore::new(Client::open(url)?))
}

/// Session store keeping each record as a plain Redis string with `SET EX`.
pub struct RedisSessionStore {
    // ---
    client: Client,
}

impl RedisSessionStore {
    // ---
    pub fn new(client: Client) -> Self {
        // ---
        Self { client }
    }

    /// Creates a new multiplexed connection for one operation.
    async fn get_conn(&self) -> Result<redis::aio::MultiplexedConnection> {
        // ---
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|err| {
                tracing::error!("Failed to connect to Redis: {:?}", err);
                err.into()
            })
    }
}

#[async_trait::async_trait]
impl SessionStore for RedisSessionStore {
    // ---
    async fn put(&self, key: &str, value: String, ttl: Duration) -> Result<()> {
        // ---
        let mut conn = self.get_conn().await?;
        conn.set_ex::<_, _, ()>(key, value, ttl.as_secs().max(1)).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        // ---
        let mut conn = self.get_conn().await?;
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn remove(&self, key: &str) -> Result<()> {
        // ---
        let mut conn = self.get_conn().await?;
        conn.del::<_, ()>(key).await?;
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        // ---
        let mut conn = self.get_conn().await?;
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}
