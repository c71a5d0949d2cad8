//! # Cache Module
//!
//! Read-through cache in front of the data store. Every failure of the cache
//! layer degrades to "as if there were no cache".

pub mod backend;
pub mod keys;
pub mod manager;
#[cfg(feature = "redis")]
pub mod redis_client;

pub use backend::{CacheBackend, MemoryCacheBackend, glob_match};
pub use manager::{CacheLookup, CacheManager, CacheTtl, CacheWrite, SharedCacheManager, shared_cache};
#[cfg(feature = "redis")]
pub use redis_client::{DEFAULT_REDIS_TIMEOUT, RedisCacheBackend, RedisCacheConfig};
