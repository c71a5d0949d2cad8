//! # API Configuration
//!
//! Environment-based configuration for the AutoMarketing API service.
//!
//! Only the bind address and numeric settings are checked at startup.
//! Credentials for the store, the cache and Claude are optional here; the
//! clients report a missing value on first use.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

use automarketing_ai::{ClaudeConfig, DEFAULT_MAX_TOKENS, DEFAULT_MODEL};
use automarketing_persistence::{CacheTtl, DEFAULT_REDIS_TIMEOUT, RedisCacheConfig, SupabaseConfig};

const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

/// Configuration errors raised at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid {name}: '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address
    pub server_addr: SocketAddr,

    /// Logging level, used when `RUST_LOG` is unset
    pub log_level: String,

    /// CORS allowed origins (`*` allows any)
    pub cors_origins: Vec<String>,

    /// Supabase project settings
    pub supabase: SupabaseSettings,

    /// Redis cache settings
    pub redis: RedisSettings,

    /// Claude API settings
    pub claude: ClaudeSettings,

    /// Time-to-live for cached products and product lists
    pub cache_ttl: Duration,
}

#[derive(Debug, Clone, Default)]
pub struct SupabaseSettings {
    pub url: Option<String>,
    pub service_role_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RedisSettings {
    pub url: Option<String>,
    pub token: Option<String>,
    /// Bound on connecting and on each command
    pub timeout: Duration,
}

#[derive(Clone)]
pub struct ClaudeSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
}

impl std::fmt::Debug for ClaudeSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClaudeSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a set variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// Empty values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a set variable cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let server_addr = var("SERVER_ADDR")
            .unwrap_or_else(|| DEFAULT_SERVER_ADDR.to_string());
        let server_addr: SocketAddr = server_addr.parse().map_err(|_| ConfigError::Invalid {
            name: "SERVER_ADDR",
            value: server_addr.clone(),
        })?;

        let cache_ttl_secs = parse_or(var("CACHE_TTL_SECS"), "CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)?;
        let max_tokens = parse_or(var("CLAUDE_MAX_TOKENS"), "CLAUDE_MAX_TOKENS", DEFAULT_MAX_TOKENS)?;
        let redis_timeout_ms = parse_or(
            var("REDIS_TIMEOUT_MS"),
            "REDIS_TIMEOUT_MS",
            u64::try_from(DEFAULT_REDIS_TIMEOUT.as_millis()).unwrap_or(u64::MAX),
        )?;

        Ok(Self {
            server_addr,

            log_level: var("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),

            cors_origins: var("CORS_ORIGINS")
                .unwrap_or_else(|| "*".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),

            supabase: SupabaseSettings {
                url: var("SUPABASE_URL"),
                service_role_key: var("SUPABASE_SERVICE_ROLE_KEY"),
            },

            redis: RedisSettings {
                url: var("REDIS_URL"),
                token: var("REDIS_TOKEN"),
                timeout: Duration::from_millis(redis_timeout_ms),
            },

            claude: ClaudeSettings {
                api_key: var("CLAUDE_API_KEY"),
                model: var("CLAUDE_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                max_tokens,
            },

            cache_ttl: Duration::from_secs(cache_ttl_secs),
        })
    }

    pub fn supabase_config(&self) -> SupabaseConfig {
        SupabaseConfig {
            url: self.supabase.url.clone(),
            key: self.supabase.service_role_key.clone(),
        }
    }

    pub fn redis_config(&self) -> RedisCacheConfig {
        RedisCacheConfig {
            url: self.redis.url.clone(),
            token: self.redis.token.clone(),
            timeout: self.redis.timeout,
        }
    }

    pub fn claude_config(&self) -> ClaudeConfig {
        ClaudeConfig {
            api_key: self.claude.api_key.clone(),
            model: self.claude.model.clone(),
            max_tokens: self.claude.max_tokens,
            ..Default::default()
        }
    }

    pub const fn cache_ttl(&self) -> CacheTtl {
        CacheTtl::uniform(self.cache_ttl)
    }
}

fn parse_or<T: std::str::FromStr>(
    value: Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
        None => Ok(default),
    }
}
