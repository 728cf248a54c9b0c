use std::{env, time::Duration};

use thiserror::Error;

const DEFAULT_NAMESPACE: &str = "hookbins";
const DEFAULT_CACHE_TTL: &str = "60000ms";
const DEFAULT_CACHE_MAX_ENTRIES: usize = 10_000;
const DEFAULT_SQLITE_PATH: &str = "hookbins.db";
const DEFAULT_REDIS_URL: &str = "redis://localhost:6379";
const DEFAULT_REDIS_TIMEOUT: &str = "2s";

/// Longest duration any setting accepts (365 days).
pub const MAX_DURATION: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Errors raised while reading configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} is not a valid duration ({value:?}): {reason}")]
    InvalidDuration {
        key: &'static str,
        value: String,
        reason: String,
    },
    #[error("{key} is not a valid number ({value:?})")]
    InvalidNumber { key: &'static str, value: String },
    #[error("{key} must be greater than zero")]
    Zero { key: &'static str },
    #[error("{key} exceeds the maximum of {max}")]
    TooLarge { key: &'static str, max: String },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Prefix for every cache key (default: "hookbins")
    pub cache_namespace: String,
    /// Time-to-live for cached bins (default: 60s)
    pub cache_ttl: Duration,
    /// Maximum number of in-memory cache entries (default: 10,000)
    pub cache_max_entries: usize,
    /// Path to SQLite database file (default: "hookbins.db")
    pub sqlite_path: String,
    /// Redis connection URL (default: "redis://localhost:6379")
    /// Note: Only used when the `redis` feature is enabled.
    pub redis_url: String,
    /// Connect and per-command timeout for Redis (default: 2s)
    pub redis_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CACHE_NAMESPACE` - Cache key prefix (default: "hookbins")
    /// - `CACHE_TTL` - Cache TTL, e.g. `60000ms` or `5m` (default: "60000ms")
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 10,000)
    /// - `SQLITE_PATH` - SQLite database path (default: "hookbins.db")
    /// - `REDIS_URL` - Redis connection URL (default: "redis://localhost:6379")
    /// - `REDIS_TIMEOUT` - Redis connect/command timeout (default: "2s")
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// Unset keys fall back to their defaults; set but malformed values are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let cache_max_entries = match lookup("CACHE_MAX_ENTRIES") {
            Some(value) => value
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidNumber {
                    key: "CACHE_MAX_ENTRIES",
                    value: value.clone(),
                })?,
            None => DEFAULT_CACHE_MAX_ENTRIES,
        };
        if cache_max_entries == 0 {
            return Err(ConfigError::Zero {
                key: "CACHE_MAX_ENTRIES",
            });
        }

        Ok(Self {
            cache_namespace: lookup("CACHE_NAMESPACE")
                .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string()),
            cache_ttl: duration(&lookup, "CACHE_TTL", DEFAULT_CACHE_TTL)?,
            cache_max_entries,
            sqlite_path: lookup("SQLITE_PATH").unwrap_or_else(|| DEFAULT_SQLITE_PATH.to_string()),
            redis_url: lookup("REDIS_URL").unwrap_or_else(|| DEFAULT_REDIS_URL.to_string()),
            redis_timeout: duration(&lookup, "REDIS_TIMEOUT", DEFAULT_REDIS_TIMEOUT)?,
        })
    }
}

fn duration<F>(lookup: &F, key: &'static str, default: &str) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(key).unwrap_or_else(|| default.to_string());
    let parsed =
        humantime::parse_duration(value.trim()).map_err(|e| ConfigError::InvalidDuration {
            key,
            value: value.clone(),
            reason: e.to_string(),
        })?;
    if parsed.is_zero() {
        return Err(ConfigError::Zero { key });
    }
    if parsed > MAX_DURATION {
        return Err(ConfigError::TooLarge {
            key,
            max: humantime::format_duration(MAX_DURATION).to_string(),
        });
    }
    Ok(parsed)
}
