//! Persistence layer error types

use thiserror::Error;

/// Data store errors
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Supabase error ({status}): {message}")]
    Store { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Missing configuration: {0}")]
    MissingConfig(&'static str),

    #[error("Store returned no row for {0}")]
    EmptyResponse(&'static str),
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(feature = "supabase")]
impl From<reqwest::Error> for PersistenceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Serialization(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, PersistenceError>;

/// Cache layer errors.
///
/// These never escape [`crate::cache::CacheManager`]; they are logged and
/// turned into miss / no-op outcomes there.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    Redis(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Missing cache configuration: {0}")]
    MissingConfig(&'static str),

    #[error("Cache backend unavailable: {0}")]
    Unavailable(String),
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(feature = "redis")]
impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        Self::Redis(err.to_string())
    }
}
