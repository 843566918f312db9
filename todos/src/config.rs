//! Configuration management for the todos application.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::i18n::Messages;
use crate::types::FilterMode;
use std::env;
use std::path::PathBuf;
use thiserror::Error;
use todos_runtime::StoreConfig;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A file named by the configuration could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A message catalog is not a flat JSON object of strings
    #[error("Invalid message catalog: {0}")]
    Catalog(#[from] serde_json::Error),

    /// A value is out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodosConfig {
    /// Log level used when `RUST_LOG` is unset (trace, debug, info, warn, error)
    pub log_level: String,
    /// Filter selected at startup
    pub default_filter: FilterMode,
    /// JSON catalog overriding the built-in English messages
    pub messages_path: Option<PathBuf>,
    /// Processed actions buffered for observers
    pub broadcast_capacity: usize,
    /// Maximum actions reduced for one event
    pub max_dispatch_depth: usize,
}

impl Default for TodosConfig {
    fn default() -> Self {
        let store = StoreConfig::default();
        Self {
            log_level: "info".to_string(),
            default_filter: FilterMode::All,
            messages_path: None,
            broadcast_capacity: store.broadcast_capacity,
            max_dispatch_depth: store.max_dispatch_depth,
        }
    }
}

impl TodosConfig {
    /// Load configuration from the process environment
    ///
    /// - `TODOS_LOG_LEVEL` (default `info`)
    /// - `TODOS_DEFAULT_FILTER` (default `all`, unknown keys mean `all`)
    /// - `TODOS_MESSAGES_PATH` (optional)
    /// - `TODOS_BROADCAST_CAPACITY` (default 16)
    /// - `TODOS_MAX_DISPATCH_DEPTH` (default 32)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// Unparseable numbers fall back to their defaults with a warning.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            log_level: lookup("TODOS_LOG_LEVEL").unwrap_or(defaults.log_level),
            default_filter: lookup("TODOS_DEFAULT_FILTER")
                .map_or(defaults.default_filter, FilterMode::from),
            messages_path: lookup("TODOS_MESSAGES_PATH")
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
            broadcast_capacity: parse_or(
                &lookup,
                "TODOS_BROADCAST_CAPACITY",
                defaults.broadcast_capacity,
            ),
            max_dispatch_depth: parse_or(
                &lookup,
                "TODOS_MAX_DISPATCH_DEPTH",
                defaults.max_dispatch_depth,
            ),
        }
    }

    /// Check value ranges
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] for a zero broadcast capacity or dispatch depth.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.broadcast_capacity == 0 {
            return Err(ConfigError::Invalid(
                "TODOS_BROADCAST_CAPACITY must be at least 1".to_string(),
            ));
        }
        if self.max_dispatch_depth == 0 {
            return Err(ConfigError::Invalid(
                "TODOS_MAX_DISPATCH_DEPTH must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Store settings derived from this configuration
    #[must_use]
    pub const fn store_config(&self) -> StoreConfig {
        StoreConfig::new(self.broadcast_capacity, self.max_dispatch_depth)
    }

    /// The message catalog: English, overlaid with `messages_path` if set
    ///
    /// # Errors
    ///
    /// Propagates [`Messages::load`] failures.
    pub fn messages(&self) -> Result<Messages, ConfigError> {
        match &self.messages_path {
            Some(path) => Messages::load(path),
            None => Ok(Messages::english()),
        }
    }
}

fn parse_or<F>(lookup: &F, key: &str, default: usize) -> usize
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    raw.trim().parse().unwrap_or_else(|_| {
        tracing::warn!(key, value = %raw, default, "Not a number, using default");
        default
    })
}
