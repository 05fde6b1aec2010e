//! Engine configuration from environment variables.
//!
//! Every key has a default, so an empty environment yields a working
//! configuration pointed at the public Overpass instance.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Tuning for the fetch orchestrator and its collaborators.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Overpass interpreter endpoint.
    pub endpoint: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Additional attempts after the first failure, per category.
    pub max_retries: u32,
    /// Base for the attempt-indexed backoff schedule.
    pub backoff_base_secs: u64,
    /// Fixed backoff applied on rate-limit responses.
    pub rate_limit_backoff_secs: u64,
    /// Pause between categories after a successful network fetch;
    /// cache hits skip it.
    pub inter_category_delay_ms: u64,
    pub cache_ttl_secs: u64,
    pub cache_capacity: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://overpass-api.de/api/interpreter".to_string(),
            request_timeout_secs: 25,
            user_agent: "huni/0.1 (livability scoring)".to_string(),
            max_retries: 3,
            backoff_base_secs: 2,
            rate_limit_backoff_secs: 5,
            inter_category_delay_ms: 2000,
            cache_ttl_secs: 1800,
            cache_capacity: 256,
        }
    }
}

impl EngineConfig {
    /// Load configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a set variable fails to parse.
    pub fn load_from_env() -> Result<Self, ConfigError> {
        build_config(|key| std::env::var(key))
    }
}

/// Build configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a
/// plain `HashMap` lookup.
pub(crate) fn build_config<F>(lookup: F) -> Result<EngineConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let defaults = EngineConfig::default();

    let or_default =
        |var: &str, default: &str| lookup(var).unwrap_or_else(|_| default.to_string());

    let parse_u32 = |var: &str, default: u32| -> Result<u32, ConfigError> {
        or_default(var, &default.to_string())
            .parse::<u32>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: u64| -> Result<u64, ConfigError> {
        or_default(var, &default.to_string())
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    Ok(EngineConfig {
        endpoint: or_default("HUNI_OVERPASS_URL", &defaults.endpoint),
        request_timeout_secs: parse_u64(
            "HUNI_REQUEST_TIMEOUT_SECS",
            defaults.request_timeout_secs,
        )?,
        user_agent: or_default("HUNI_USER_AGENT", &defaults.user_agent),
        max_retries: parse_u32("HUNI_MAX_RETRIES", defaults.max_retries)?,
        backoff_base_secs: parse_u64("HUNI_BACKOFF_BASE_SECS", defaults.backoff_base_secs)?,
        rate_limit_backoff_secs: parse_u64(
            "HUNI_RATE_LIMIT_BACKOFF_SECS",
            defaults.rate_limit_backoff_secs,
        )?,
        inter_category_delay_ms: parse_u64(
            "HUNI_INTER_CATEGORY_DELAY_MS",
            defaults.inter_category_delay_ms,
        )?,
        cache_ttl_secs: parse_u64("HUNI_CACHE_TTL_SECS", defaults.cache_ttl_secs)?,
        cache_capacity: parse_u64("HUNI_CACHE_CAPACITY", defaults.cache_capacity)?,
    })
}
