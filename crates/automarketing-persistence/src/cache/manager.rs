//! Typed, failure-absorbing cache facade.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::{Serialize, de::DeserializeOwned};

use super::backend::CacheBackend;
use crate::error::CacheError;

/// Cache TTL configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTtl {
    pub product: Duration,
    pub product_list: Duration,
}

impl CacheTtl {
    /// Same ttl for every entry kind
    pub const fn uniform(ttl: Duration) -> Self {
        Self {
            product: ttl,
            product_list: ttl,
        }
    }
}

impl Default for CacheTtl {
    fn default() -> Self {
        Self::uniform(Duration::from_secs(3600))
    }
}

/// Result of a cache read.
#[derive(Debug)]
pub enum CacheLookup<T> {
    Hit(T),
    /// Key absent, expired, or holding a value that no longer decodes
    Miss,
    /// The cache layer itself failed; callers should go to the source
    Unavailable(CacheError),
}

impl<T> CacheLookup<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Hit(value) => Some(value),
            Self::Miss | Self::Unavailable(_) => None,
        }
    }
}

/// Result of a cache mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheWrite {
    Applied { affected: u64 },
    /// The backend failed; the error was logged and dropped
    Degraded,
}

impl CacheWrite {
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// JSON cache over any [`CacheBackend`].
///
/// No method returns a cache error: reads degrade to misses, writes to
/// [`CacheWrite::Degraded`], and counts to zero.
#[derive(Clone)]
pub struct CacheManager {
    backend: Arc<dyn CacheBackend>,
}

impl CacheManager {
    pub fn new(backend: impl CacheBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    pub fn from_shared(backend: Arc<dyn CacheBackend>) -> Self {
        Self { backend }
    }

    /// Read and decode `key`, keeping the reason for a non-hit.
    pub async fn lookup<T: DeserializeOwned>(&self, key: &str) -> CacheLookup<T> {
        match self.backend.get(key).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => {
                    tracing::debug!(key, "Cache hit");
                    CacheLookup::Hit(value)
                }
                Err(e) => {
                    tracing::warn!(key, error = %e, "Undecodable cache entry, treating as miss");
                    CacheLookup::Miss
                }
            },
            Ok(None) => {
                tracing::debug!(key, "Cache miss");
                CacheLookup::Miss
            }
            Err(e) => {
                tracing::warn!(key, error = %e, "Cache read failed");
                CacheLookup::Unavailable(e)
            }
        }
    }

    /// Cached value, or `None` on miss or any cache failure
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.lookup(key).await.into_option()
    }

    /// Store `value`, expiring after `ttl` when given
    pub async fn set<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        ttl: Option<Duration>,
    ) -> CacheWrite {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(key, error = %e, "Cache value not serializable");
                return CacheWrite::Degraded;
            }
        };

        match self.backend.set(key, json, ttl).await {
            Ok(()) => CacheWrite::Applied { affected: 1 },
            Err(e) => {
                tracing::warn!(key, error = %e, "Cache write failed");
                CacheWrite::Degraded
            }
        }
    }

    /// Remove a single entry
    pub async fn delete(&self, key: &str) -> CacheWrite {
        match self.backend.delete(key).await {
            Ok(affected) => CacheWrite::Applied { affected },
            Err(e) => {
                tracing::warn!(key, error = %e, "Cache delete failed");
                CacheWrite::Degraded
            }
        }
    }

    /// Remove every entry whose key matches `pattern`, in one batch.
    ///
    /// No match is a no-op, not an error.
    pub async fn delete_by_pattern(&self, pattern: &str) -> CacheWrite {
        let keys = match self.backend.keys(pattern).await {
            Ok(keys) => keys,
            Err(e) => {
                tracing::warn!(pattern, error = %e, "Cache key scan failed");
                return CacheWrite::Degraded;
            }
        };

        if keys.is_empty() {
            return CacheWrite::Applied { affected: 0 };
        }

        match self.backend.delete_many(&keys).await {
            Ok(affected) => {
                tracing::debug!(pattern, affected, "Cache entries invalidated");
                CacheWrite::Applied { affected }
            }
            Err(e) => {
                tracing::warn!(pattern, error = %e, "Cache batch delete failed");
                CacheWrite::Degraded
            }
        }
    }

    /// Flush the whole namespace
    pub async fn clear(&self) -> CacheWrite {
        match self.backend.clear().await {
            Ok(()) => CacheWrite::Applied { affected: 0 },
            Err(e) => {
                tracing::warn!(error = %e, "Cache flush failed");
                CacheWrite::Degraded
            }
        }
    }

    /// Number of stored entries, 0 when the cache cannot be reached
    pub async fn size(&self) -> usize {
        self.backend.size().await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Cache size query failed");
            0
        })
    }

    /// Whether the cache answers at all
    pub async fn ping(&self) -> bool {
        match self.backend.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Cache ping failed");
                false
            }
        }
    }

    /// Read-through helper.
    ///
    /// On a hit the cached value is returned. On a miss `fetcher` runs, its
    /// value is stored under `key` for `ttl` and returned. If the cache is
    /// unreachable, `fetcher`'s result is returned without a store attempt.
    /// Errors from `fetcher` are propagated and nothing is cached.
    pub async fn get_or_set<T, E, F, Fut>(&self, key: &str, ttl: Duration, fetcher: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        match self.lookup(key).await {
            CacheLookup::Hit(value) => Ok(value),
            CacheLookup::Miss => {
                let value = fetcher().await?;
                self.set(key, &value, Some(ttl)).await;
                Ok(value)
            }
            CacheLookup::Unavailable(_) => fetcher().await,
        }
    }
}

/// Shared cache manager wrapper
pub type SharedCacheManager = Arc<CacheManager>;

/// Create a shared cache manager
pub fn shared_cache(manager: CacheManager) -> SharedCacheManager {
    Arc::new(manager)
}
