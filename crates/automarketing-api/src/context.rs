//! # API Context
//!
//! Application state shared by every handler. Clients are built once at
//! startup and handed around behind `Arc`s.

use std::sync::Arc;

use automarketing_ai::ClaudeClient;
use automarketing_persistence::{
    CacheManager, CacheTtl, ProductRepository, RedisCacheBackend, SharedCacheManager,
    SupabaseProductRepository, shared_cache,
};

use crate::config::Config;

/// Application context shared across all handlers
#[derive(Clone)]
pub struct ApiContext {
    /// Product store (source of truth)
    pub products: Arc<dyn ProductRepository>,

    /// Read-through cache in front of the store
    pub cache: SharedCacheManager,

    /// Claude API client
    pub ai: Arc<ClaudeClient>,

    /// Cache lifetimes
    pub ttl: CacheTtl,
}

impl ApiContext {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        cache: CacheManager,
        ai: ClaudeClient,
        ttl: CacheTtl,
    ) -> Self {
        Self {
            products,
            cache: shared_cache(cache),
            ai: Arc::new(ai),
            ttl,
        }
    }

    /// Wire the Supabase store, the Redis cache and Claude from `config`.
    ///
    /// Nothing connects here; each client connects on first use.
    pub fn from_config(config: &Config) -> Self {
        let products = SupabaseProductRepository::new(config.supabase_config());
        let cache = CacheManager::new(RedisCacheBackend::new(config.redis_config()));
        let ai = ClaudeClient::new(config.claude_config());

        Self::new(Arc::new(products), cache, ai, config.cache_ttl())
    }
}

/// Builder for ApiContext
pub struct ApiContextBuilder {
    products: Option<Arc<dyn ProductRepository>>,
    cache: Option<CacheManager>,
    ai: Option<ClaudeClient>,
    ttl: CacheTtl,
}

impl ApiContextBuilder {
    pub fn new() -> Self {
        Self {
            products: None,
            cache: None,
            ai: None,
            ttl: CacheTtl::default(),
        }
    }

    #[must_use]
    pub fn with_products(mut self, products: Arc<dyn ProductRepository>) -> Self {
        self.products = Some(products);
        self
    }

    #[must_use]
    pub fn with_cache(mut self, cache: CacheManager) -> Self {
        self.cache = Some(cache);
        self
    }

    #[must_use]
    pub fn with_ai(mut self, ai: ClaudeClient) -> Self {
        self.ai = Some(ai);
        self
    }

    #[must_use]
    pub const fn with_ttl(mut self, ttl: CacheTtl) -> Self {
        self.ttl = ttl;
        self
    }

    /// # Errors
    ///
    /// Fails when the product store or the cache was not supplied.
    pub fn build(self) -> Result<ApiContext, &'static str> {
        let products = self.products.ok_or("Product repository required")?;
        let cache = self.cache.ok_or("Cache manager required")?;
        let ai = self.ai.unwrap_or_else(|| ClaudeClient::new(Default::default()));
        Ok(ApiContext::new(products, cache, ai, self.ttl))
    }
}

impl Default for ApiContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
