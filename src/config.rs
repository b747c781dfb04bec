//! Runtime configuration read from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `POSTBOX_DATABASE_URL` (falls back to `DATABASE_URL`) | required |
//! | `POSTBOX_DB_POOL_SIZE` | `10` |
//! | `POSTBOX_DB_CONNECT_TIMEOUT_SECS` | `30` |
//! | `POSTBOX_LOG` | `info` |

use std::time::Duration;
use thiserror::Error;

const DATABASE_URL: &str = "POSTBOX_DATABASE_URL";
const FALLBACK_DATABASE_URL: &str = "DATABASE_URL";
const POOL_SIZE: &str = "POSTBOX_DB_POOL_SIZE";
const CONNECT_TIMEOUT: &str = "POSTBOX_DB_CONNECT_TIMEOUT_SECS";
const LOG_FILTER: &str = "POSTBOX_LOG";

const DEFAULT_POOL_SIZE: u32 = 10;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_LOG_FILTER: &str = "info";

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or blank.
    #[error("{0} must be set")]
    Missing(&'static str),
    /// A variable holds an unparseable or out-of-range value.
    #[error("{name} has invalid value {value:?}: {reason}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// Raw value.
        value: String,
        /// What was wrong with it.
        reason: String,
    },
}

/// Database connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    url: String,
    pool_size: u32,
    connect_timeout: Duration,
}

impl DatabaseConfig {
    /// Creates settings with default pool size and timeout.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            pool_size: DEFAULT_POOL_SIZE,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }

    /// Returns the connection URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the maximum number of pooled connections.
    #[must_use]
    pub const fn pool_size(&self) -> u32 {
        self.pool_size
    }

    /// Returns how long to wait for a pooled connection.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }
}

/// Complete runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    database: DatabaseConfig,
    log_filter: String,
}

impl Config {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the database URL is missing or a numeric
    /// setting does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through `lookup`, which returns the value of a
    /// variable if set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the database URL is missing or a numeric
    /// setting does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let url = read(DATABASE_URL)
            .or_else(|| read(FALLBACK_DATABASE_URL))
            .ok_or(ConfigError::Missing(DATABASE_URL))?;
        let pool_size = parse_or(read(POOL_SIZE), POOL_SIZE, DEFAULT_POOL_SIZE)?;
        if pool_size == 0 {
            return Err(ConfigError::Invalid {
                name: POOL_SIZE,
                value: pool_size.to_string(),
                reason: "must be at least 1".to_owned(),
            });
        }
        let timeout_secs = parse_or(
            read(CONNECT_TIMEOUT),
            CONNECT_TIMEOUT,
            DEFAULT_CONNECT_TIMEOUT_SECS,
        )?;

        Ok(Self {
            database: DatabaseConfig {
                url,
                pool_size,
                connect_timeout: Duration::from_secs(timeout_secs),
            },
            log_filter: read(LOG_FILTER).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_owned()),
        })
    }

    /// Returns the database settings.
    #[must_use]
    pub const fn database(&self) -> &DatabaseConfig {
        &self.database
    }

    /// Returns the `tracing` filter directive.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }
}

fn parse_or<T>(raw: Option<String>, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.map_or(Ok(default), |value| {
        value.parse().map_err(|err: T::Err| ConfigError::Invalid {
            name,
            reason: err.to_string(),
            value,
        })
    })
}
