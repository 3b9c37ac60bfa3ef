//! Runtime configuration
//!
//! Everything is read from the environment (a `.env` file is loaded first by
//! `main`). Unset variables fall back to defaults; set-but-invalid variables
//! are reported instead of being silently replaced.
//!
//! | Variable           | Default                 | Meaning                          |
//! |--------------------|-------------------------|----------------------------------|
//! | `PORT`             | `8080`                  | HTTP listen port                 |
//! | `PUBLIC_BASE_URL`  | `http://localhost:8080` | Prefix of returned short URLs    |
//! | `STORE_BACKEND`    | `redb`                  | `redb` (durable) or `memory`     |
//! | `DATABASE_URL`     | `data.db`               | redb database file path          |
//! | `STORE_TIMEOUT_MS` | `3000`                  | Per-call timeout of the store    |

use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Which link store backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Volatile in-process table, lost on restart
    Memory,
    /// Durable embedded redb database
    Redb,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "redb" => Ok(StoreBackend::Redb),
            other => Err(ConfigError::Invalid {
                key: "STORE_BACKEND",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub public_base_url: String,
    pub store_backend: StoreBackend,
    pub database_url: String,
    pub store_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            public_base_url: "http://localhost:8080".to_string(),
            store_backend: StoreBackend::Redb,
            database_url: "data.db".to_string(),
            store_timeout: Duration::from_millis(3000),
        }
    }
}

impl Config {
    /// Builds the configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Config::default();

        let port = match get("PORT") {
            Some(v) => parse_value("PORT", &v)?,
            None => defaults.port,
        };

        let store_backend = match get("STORE_BACKEND") {
            Some(v) => v.parse()?,
            None => defaults.store_backend,
        };

        let store_timeout = match get("STORE_TIMEOUT_MS") {
            Some(v) => Duration::from_millis(parse_value("STORE_TIMEOUT_MS", &v)?),
            None => defaults.store_timeout,
        };

        Ok(Config {
            port,
            public_base_url: get("PUBLIC_BASE_URL").unwrap_or(defaults.public_base_url),
            store_backend,
            database_url: get("DATABASE_URL").unwrap_or(defaults.database_url),
            store_timeout,
        })
    }
}

fn parse_value<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: value.to_string(),
    })
}
