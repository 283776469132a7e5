//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Currency metadata configuration.
    #[serde(default)]
    pub currency: CurrencyConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Upper bound for opening or acquiring a pooled connection, in
    /// milliseconds.
    #[serde(default = "default_acquire_timeout_ms")]
    pub acquire_timeout_ms: u64,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_acquire_timeout_ms() -> u64 {
    2000
}

/// Currency metadata configuration.
///
/// Controls how long precision maps are cached and how long a fetch from the
/// metadata source may take before the static table is used instead.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CurrencyConfig {
    /// Upper bound for one precision-map fetch, in milliseconds.
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,
    /// Lifetime of a source-backed precision map. `None` keeps it for the
    /// life of the process (or until invalidated).
    #[serde(default)]
    pub cache_ttl_secs: Option<u64>,
    /// Lifetime of a static-fallback precision map before the source is
    /// retried.
    #[serde(default = "default_fallback_retry_secs")]
    pub fallback_retry_secs: u64,
    /// Lifetime of the database source's own row cache.
    #[serde(default = "default_source_cache_ttl_secs")]
    pub source_cache_ttl_secs: u64,
    /// Locale used for display formatting when the caller has none.
    #[serde(default = "default_locale")]
    pub default_locale: String,
}

fn default_fetch_timeout_ms() -> u64 {
    2000
}

fn default_fallback_retry_secs() -> u64 {
    60
}

fn default_source_cache_ttl_secs() -> u64 {
    300 // 5 minutes
}

fn default_locale() -> String {
    "en-US".to_string()
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_ms: default_fetch_timeout_ms(),
            cache_ttl_secs: None,
            fallback_retry_secs: default_fallback_retry_secs(),
            source_cache_ttl_secs: default_source_cache_ttl_secs(),
            default_locale: default_locale(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("CENTIME").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
