//! Cache service trait and error type.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    Connection(String),
    #[error("Cache operation error: {0}")]
    Operation(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Key/value cache with TTL and pattern-based bulk deletion, used as a
/// read-through cache over listing queries.
///
/// The cache is advisory on the read path: implementations must degrade a
/// failed `get` to a miss so requests fall back to persistence. Write errors
/// (`set`) DO propagate — the caller decides what a failed write-through
/// means for the request.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache
/// - [`crate::infrastructure::cache::NullCache`] - no-op for disabled caching
/// - [`crate::infrastructure::cache::MemoryCache`] - in-process fake for tests
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves a value. `Ok(None)` on miss or on a backend read error.
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores a value with a TTL in seconds.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Operation`] when the backend write fails.
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> CacheResult<()>;

    /// Lists keys matching a glob pattern (e.g. `books:*`).
    async fn keys(&self, pattern: &str) -> CacheResult<Vec<String>>;

    /// Deletes the given keys. A no-op for an empty slice.
    async fn delete_many(&self, keys: &[String]) -> CacheResult<()>;

    /// Checks if the cache backend is reachable.
    async fn health_check(&self) -> bool;
}
