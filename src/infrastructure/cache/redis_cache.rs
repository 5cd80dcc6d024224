//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, error, info, warn};

/// Redis cache for listing results.
///
/// Uses `ConnectionManager` for connection reuse. Reads are fail-open (a
/// backend error is logged and reported as a miss); writes propagate their
/// errors to the caller.
pub struct RedisCache {
    client: ConnectionManager,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Connection`] if the URL is invalid, the
    /// connection cannot be established, or the PING health check fails.
    pub async fn connect(redis_url: &str) -> CacheResult<Self> {
        let client = Client::open(redis_url).map_err(|e| {
            CacheError::Connection(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| CacheError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::Connection(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self { client: manager })
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let mut conn = self.client.clone();

        match conn.get::<_, Option<String>>(key).await {
            Ok(Some(value)) => {
                debug!(key, "cache HIT");
                Ok(Some(value))
            }
            Ok(None) => {
                debug!(key, "cache MISS");
                Ok(None)
            }
            Err(e) => {
                error!(key, error = %e, "Redis GET failed, treating as miss");
                Ok(None)
            }
        }
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> CacheResult<()> {
        let mut conn = self.client.clone();

        conn.set_ex::<_, _, ()>(key, value, ttl_seconds)
            .await
            .map_err(|e| {
                warn!(key, error = %e, "Redis SET failed");
                CacheError::Operation(format!("Redis SET failed: {}", e))
            })?;

        debug!(key, ttl_seconds, "cache SET");
        Ok(())
    }

    async fn keys(&self, pattern: &str) -> CacheResult<Vec<String>> {
        let mut conn = self.client.clone();

        conn.keys::<_, Vec<String>>(pattern)
            .await
            .map_err(|e| CacheError::Operation(format!("Redis KEYS failed: {}", e)))
    }

    async fn delete_many(&self, keys: &[String]) -> CacheResult<()> {
        if keys.is_empty() {
            return Ok(());
        }

        let mut conn = self.client.clone();

        let deleted = conn
            .del::<_, i64>(keys.to_vec())
            .await
            .map_err(|e| CacheError::Operation(format!("Redis DEL failed: {}", e)))?;

        debug!(deleted, "cache invalidated");
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
