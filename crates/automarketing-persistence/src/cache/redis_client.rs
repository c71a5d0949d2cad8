//! # Redis Cache Backend
//!
//! Redis implementation of [`CacheBackend`]. The connection is opened on
//! first use and then shared by every request through a
//! [`ConnectionManager`], which reconnects on its own after transient drops.
//!
//! Every operation, connection setup included, is bounded by
//! [`RedisCacheConfig::timeout`]. An unreachable server therefore costs one
//! timeout per request and surfaces as [`CacheError::Unavailable`].

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::{AsyncCommands, Client, IntoConnectionInfo};
use tokio::sync::OnceCell;

use super::backend::CacheBackend;
use crate::error::CacheError;

/// Default bound on a single cache operation
pub const DEFAULT_REDIS_TIMEOUT: Duration = Duration::from_secs(1);

/// Redis connection configuration.
///
/// Both credentials are required, but their absence only surfaces when the
/// cache is first used.
#[derive(Debug, Clone)]
pub struct RedisCacheConfig {
    /// `redis://` or `rediss://` endpoint
    pub url: Option<String>,
    /// Access token, sent as the connection password
    pub token: Option<String>,
    /// Upper bound for connecting and for each command
    pub timeout: Duration,
}

impl Default for RedisCacheConfig {
    fn default() -> Self {
        Self {
            url: None,
            token: None,
            timeout: DEFAULT_REDIS_TIMEOUT,
        }
    }
}

/// Redis-backed cache with a lazily established connection
pub struct RedisCacheBackend {
    config: RedisCacheConfig,
    conn: OnceCell<ConnectionManager>,
}

impl RedisCacheBackend {
    /// Create a backend without touching the network
    pub fn new(config: RedisCacheConfig) -> Self {
        Self {
            config,
            conn: OnceCell::new(),
        }
    }

    /// Shared connection, established on the first call.
    ///
    /// A failed attempt leaves the cell empty so the next call retries.
    async fn connection(&self) -> Result<ConnectionManager, CacheError> {
        let conn = self
            .conn
            .get_or_try_init(|| async {
                let url = self
                    .config
                    .url
                    .as_deref()
                    .ok_or(CacheError::MissingConfig("REDIS_URL"))?;
                let token = self
                    .config
                    .token
                    .as_deref()
                    .ok_or(CacheError::MissingConfig("REDIS_TOKEN"))?;

                let mut info = url.into_connection_info()?;
                info.redis.password = Some(token.to_string());

                // No internal retry loop; the next request tries again
                let manager_config = ConnectionManagerConfig::new()
                    .set_number_of_retries(0)
                    .set_connection_timeout(self.config.timeout)
                    .set_response_timeout(self.config.timeout);

                let client = Client::open(info)?;
                let conn = ConnectionManager::new_with_config(client, manager_config).await?;
                tracing::info!("Redis cache connected");
                Ok::<_, CacheError>(conn)
            })
            .await?;

        Ok(conn.clone())
    }

    /// Run `op` under the configured deadline.
    async fn bounded<T, Fut>(&self, command: &'static str, op: Fut) -> Result<T, CacheError>
    where
        Fut: Future<Output = Result<T, CacheError>>,
    {
        tokio::time::timeout(self.config.timeout, op)
            .await
            .map_err(|_| {
                CacheError::Unavailable(format!(
                    "{command} timed out after {}ms",
                    self.config.timeout.as_millis()
                ))
            })?
    }
}

#[async_trait]
impl CacheBackend for RedisCacheBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.bounded("GET", async {
            let mut conn = self.connection().await?;
            let value: Option<String> = conn.get(key).await?;
            Ok(value)
        })
        .await
    }

    async fn set(&self, key: &str, value: String, ttl: Option<Duration>) -> Result<(), CacheError> {
        self.bounded("SET", async {
            let mut conn = self.connection().await?;
            match ttl {
                // SETEX rejects 0; round sub-second ttls up
                Some(ttl) => {
                    let _: () = conn.set_ex(key, value, ttl.as_secs().max(1)).await?;
                }
                None => {
                    let _: () = conn.set(key, value).await?;
                }
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, key: &str) -> Result<u64, CacheError> {
        self.bounded("DEL", async {
            let mut conn = self.connection().await?;
            let deleted: u64 = conn.del(key).await?;
            Ok(deleted)
        })
        .await
    }

    async fn delete_many(&self, keys: &[String]) -> Result<u64, CacheError> {
        if keys.is_empty() {
            return Ok(0);
        }
        self.bounded("DEL", async {
            let mut conn = self.connection().await?;
            let deleted: u64 = conn.del(keys).await?;
            Ok(deleted)
        })
        .await
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>, CacheError> {
        self.bounded("KEYS", async {
            let mut conn = self.connection().await?;
            let keys: Vec<String> = conn.keys(pattern).await?;
            Ok(keys)
        })
        .await
    }

    async fn clear(&self) -> Result<(), CacheError> {
        self.bounded("FLUSHDB", async {
            let mut conn = self.connection().await?;
            let _: () = redis::cmd("FLUSHDB").query_async(&mut conn).await?;
            Ok(())
        })
        .await
    }

    async fn size(&self) -> Result<usize, CacheError> {
        self.bounded("DBSIZE", async {
            let mut conn = self.connection().await?;
            let size: usize = redis::cmd("DBSIZE").query_async(&mut conn).await?;
            Ok(size)
        })
        .await
    }

    async fn ping(&self) -> Result<(), CacheError> {
        self.bounded("PING", async {
            let mut conn = self.connection().await?;
            let _: String = redis::cmd("PING").query_async(&mut conn).await?;
            Ok(())
        })
        .await
    }
}
