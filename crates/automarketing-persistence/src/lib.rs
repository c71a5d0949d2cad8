//! # AutoMarketing Persistence Library
//!
//! Persistence layer for the AutoMarketing product service.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     HTTP Handlers                            │
//! └─────────────────────────────────────────────────────────────┘
//!                    │                   │
//!                    ▼                   ▼
//! ┌─────────────────────────┐   ┌──────────────────────────────┐
//! │      CacheManager       │   │     ProductRepository        │
//! │ (read-through, absorbs  │   │  (Supabase / in-memory)      │
//! │   every cache failure)  │   │                              │
//! └─────────────────────────┘   └──────────────────────────────┘
//!              │                                │
//!              ▼                                ▼
//! ┌─────────────────────────┐   ┌──────────────────────────────┐
//! │     Redis Cache         │   │     Supabase PostgREST       │
//! │   (optional, lazy)      │   │     (Source of Truth)        │
//! └─────────────────────────┘   └──────────────────────────────┘
//! ```
//!
//! ## Features
//!
//! - `supabase`: Enable the Supabase repository (default)
//! - `redis`: Enable the Redis cache backend (default)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use automarketing_persistence::{
//!     cache::{CacheManager, RedisCacheBackend, RedisCacheConfig},
//!     repository::{SupabaseConfig, SupabaseProductRepository},
//! };
//!
//! let cache = CacheManager::new(RedisCacheBackend::new(RedisCacheConfig::default()));
//! let products = SupabaseProductRepository::new(SupabaseConfig::default());
//!
//! let list = cache
//!     .get_or_set("products:list:all", ttl, || products.list(None))
//!     .await?;
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod error;
pub mod repository;

// Re-export commonly used types
pub use cache::{
    CacheBackend, CacheLookup, CacheManager, CacheTtl, CacheWrite, MemoryCacheBackend,
    SharedCacheManager, shared_cache,
};
#[cfg(feature = "redis")]
pub use cache::{DEFAULT_REDIS_TIMEOUT, RedisCacheBackend, RedisCacheConfig};
pub use error::{CacheError, PersistenceError, Result};
pub use repository::{InMemoryProductRepository, ProductRepository};
#[cfg(feature = "supabase")]
pub use repository::{SupabaseConfig, SupabaseProductRepository};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
