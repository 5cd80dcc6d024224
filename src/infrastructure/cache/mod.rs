//! Caching layer for listing queries.
//!
//! Provides a [`CacheService`] trait with three implementations:
//! - [`RedisCache`] - production Redis-backed cache
//! - [`NullCache`] - no-op when caching is disabled
//! - [`MemoryCache`] - storing fake used by tests

mod memory_cache;
mod null_cache;
mod redis_cache;
mod service;

pub use memory_cache::MemoryCache;
pub use null_cache::NullCache;
pub use redis_cache::RedisCache;
pub use service::{CacheError, CacheResult, CacheService};
