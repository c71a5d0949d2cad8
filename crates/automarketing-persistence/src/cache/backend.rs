//! Raw cache backends.
//!
//! Backends speak strings and report every failure. Typing, JSON encoding
//! and failure absorption live one level up in [`super::CacheManager`].

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::error::CacheError;

/// Key/value store used by [`super::CacheManager`].
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Get the raw value stored under `key`
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Store `value`, expiring after `ttl` when given
    async fn set(&self, key: &str, value: String, ttl: Option<Duration>) -> Result<(), CacheError>;

    /// Delete a single key, returning how many entries were removed
    async fn delete(&self, key: &str) -> Result<u64, CacheError>;

    /// Delete several keys in one round trip
    async fn delete_many(&self, keys: &[String]) -> Result<u64, CacheError>;

    /// List keys matching a glob pattern (`*`, `?`)
    async fn keys(&self, pattern: &str) -> Result<Vec<String>, CacheError>;

    /// Remove every entry in the namespace
    async fn clear(&self) -> Result<(), CacheError>;

    /// Number of live entries
    async fn size(&self) -> Result<usize, CacheError>;

    /// Round-trip check
    async fn ping(&self) -> Result<(), CacheError>;
}

// =============================================================================
// IN-MEMORY BACKEND
// =============================================================================

#[derive(Debug)]
struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|at| now < at)
    }
}

/// Process-local cache backend with per-entry expiry.
///
/// Expired entries are invisible to every operation and are dropped lazily.
#[derive(Debug, Default)]
pub struct MemoryCacheBackend {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryCacheBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheBackend for MemoryCacheBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.is_live(now) => return Ok(Some(entry.value.clone())),
                Some(_) => {}
                None => return Ok(None),
            }
        }

        // Expired: evict
        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|e| !e.is_live(now)) {
            entries.remove(key);
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: String, ttl: Option<Duration>) -> Result<(), CacheError> {
        let expires_at = ttl.map(|ttl| Instant::now() + ttl);
        self.entries
            .write()
            .await
            .insert(key.to_string(), Entry { value, expires_at });
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<u64, CacheError> {
        let now = Instant::now();
        let removed = self.entries.write().await.remove(key);
        Ok(u64::from(removed.is_some_and(|e| e.is_live(now))))
    }

    async fn delete_many(&self, keys: &[String]) -> Result<u64, CacheError> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let removed = keys
            .iter()
            .filter_map(|k| entries.remove(k))
            .filter(|e| e.is_live(now))
            .count();
        Ok(removed as u64)
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>, CacheError> {
        let now = Instant::now();
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|(k, e)| e.is_live(now) && glob_match(pattern, k))
            .map(|(k, _)| k.clone())
            .collect())
    }

    async fn clear(&self) -> Result<(), CacheError> {
        self.entries.write().await.clear();
        Ok(())
    }

    async fn size(&self) -> Result<usize, CacheError> {
        let now = Instant::now();
        let entries = self.entries.read().await;
        Ok(entries.values().filter(|e| e.is_live(now)).count())
    }

    async fn ping(&self) -> Result<(), CacheError> {
        Ok(())
    }
}

/// Redis-style glob match supporting `*` (any run) and `?` (one char).
pub fn glob_match(pattern: &str, key: &str) -> bool {
    let p: Vec<char> = pattern.chars().collect();
    let k: Vec<char> = key.chars().collect();

    let (mut pi, mut ki) = (0, 0);
    // Last `*` seen and the key position it is currently absorbing up to
    let mut star: Option<(usize, usize)> = None;

    while ki < k.len() {
        if pi < p.len() && p[pi] == '*' {
            star = Some((pi, ki));
            pi += 1;
        } else if pi < p.len() && (p[pi] == '?' || p[pi] == k[ki]) {
            pi += 1;
            ki += 1;
        } else if let Some((star_pi, star_ki)) = star {
            pi = star_pi + 1;
            ki = star_ki + 1;
            star = Some((star_pi, star_ki + 1));
        } else {
            return false;
        }
    }

    p[pi..].iter().all(|&c| c == '*')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glob_match() {
        assert!(glob_match("products:list:*", "products:list:all"));
        assert!(glob_match("products:list:*", "products:list:"));
        assert!(glob_match("product:?", "product:1"));
        assert!(glob_match("*", "anything"));
        assert!(glob_match("a*b*c", "aXXbYYc"));

        assert!(!glob_match("products:list:*", "product:42"));
        assert!(!glob_match("product:?", "product:12"));
        assert!(!glob_match("a*b", "aXXc"));
    }

    #[tokio::test]
    async fn test_set_get_delete() {
        let cache = MemoryCacheBackend::new();

        cache.set("k", "v".to_string(), None).await.unwrap();
        assert_eq!(cache.get("k").await.unwrap(), Some("v".to_string()));
        assert_eq!(cache.size().await.unwrap(), 1);

        assert_eq!(cache.delete("k").await.unwrap(), 1);
        assert_eq!(cache.delete("k").await.unwrap(), 0);
        assert_eq!(cache.get("k").await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entries_expire() {
        let cache = MemoryCacheBackend::new();
        cache
            .set("short", "1".to_string(), Some(Duration::from_secs(10)))
            .await
            .unwrap();
        cache.set("forever", "2".to_string(), None).await.unwrap();

        tokio::time::advance(Duration::from_secs(9)).await;
        assert!(cache.get("short").await.unwrap().is_some());

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(cache.get("short").await.unwrap().is_none());
        assert_eq!(cache.size().await.unwrap(), 1);
        assert_eq!(cache.keys("*").await.unwrap(), vec!["forever".to_string()]);
    }

    #[tokio::test]
    async fn test_keys_and_delete_many() {
        let cache = MemoryCacheBackend::new();
        for key in ["products:list:all", "products:list:active", "product:1"] {
            cache.set(key, "[]".to_string(), None).await.unwrap();
        }

        let mut keys = cache.keys("products:list:*").await.unwrap();
        keys.sort();
        assert_eq!(keys, vec!["products:list:active", "products:list:all"]);

        assert_eq!(cache.delete_many(&keys).await.unwrap(), 2);
        assert_eq!(cache.size().await.unwrap(), 1);

        cache.clear().await.unwrap();
        assert_eq!(cache.size().await.unwrap(), 0);
    }
}
