//! Configuration file loading with precedence handling.

use crate::catalog::DEFAULT_CAPACITY;
use crate::state::NavPolicy;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;
use url::Url;

/// Default catalog endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://fakestoreapi.com/products";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// Catalog endpoint is not an absolute http(s) URL.
    #[error("Invalid catalog endpoint '{value}': {reason}")]
    InvalidEndpoint {
        /// Rejected value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/prodfind/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Catalog endpoint URL.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Quiet period before a keystroke burst is committed.
    #[serde(default)]
    pub debounce_ms: Option<u64>,

    /// Per-request HTTP timeout.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Extra attempts after a retryable fetch failure.
    #[serde(default)]
    pub retries: Option<u32>,

    /// How long a cached response is served without refetching.
    #[serde(default)]
    pub stale_after_ms: Option<u64>,

    /// How long a cached response is kept at all.
    #[serde(default)]
    pub cache_ttl_secs: Option<u64>,

    /// Most responses the cache keeps before dropping the least recently used.
    #[serde(default)]
    pub cache_capacity: Option<usize>,

    /// `limit` query parameter.
    #[serde(default)]
    pub page_size: Option<u32>,

    /// Send `search`, `page` and `limit` to the server.
    #[serde(default)]
    pub forward_query_params: Option<bool>,

    /// Arrow-key behavior at the list ends: "wrap" or "clamp".
    #[serde(default)]
    pub nav_policy: Option<NavPolicy>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
/// `endpoint` stays a string until [`ResolvedConfig::endpoint_url`] validates
/// it, so a bad value from any layer is reported once, at the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Catalog endpoint.
    pub endpoint: String,
    /// Debounce delay.
    pub debounce: Duration,
    /// HTTP request timeout.
    pub request_timeout: Duration,
    /// Retry count for retryable failures.
    pub retries: u32,
    /// Cache freshness window.
    pub stale_after: Duration,
    /// Cache eviction age.
    pub cache_ttl: Duration,
    /// Cache size bound, in responses.
    pub cache_capacity: usize,
    /// `limit` query parameter.
    pub page_size: u32,
    /// Whether query parameters are forwarded.
    pub forward_query_params: bool,
    /// Arrow-key end behavior.
    pub nav_policy: NavPolicy,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            debounce: Duration::from_millis(300),
            request_timeout: Duration::from_secs(10),
            retries: 1,
            stale_after: Duration::from_secs(5),
            cache_ttl: Duration::from_secs(5 * 60),
            cache_capacity: DEFAULT_CAPACITY,
            page_size: 15,
            forward_query_params: false,
            nav_policy: NavPolicy::Wrap,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Parse and validate the endpoint.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEndpoint` unless the value is an
    /// absolute `http` or `https` URL with a host.
    pub fn endpoint_url(&self) -> Result<Url, ConfigError> {
        parse_endpoint(&self.endpoint)
    }
}

/// Validate a catalog endpoint string.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEndpoint` for unparsable URLs, non-http
/// schemes, and URLs without a host.
pub fn parse_endpoint(value: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEndpoint {
        value: value.to_string(),
        reason,
    };

    let url = Url::parse(value.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }
    Ok(url)
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/prodfind/prodfind.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("prodfind").join("prodfind.log")
    } else {
        PathBuf::from("prodfind.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/prodfind/config.toml` on Unix, appropriate path on other platforms.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("prodfind").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `PRODFIND_CONFIG` environment variable
/// 3. Default path `~/.config/prodfind/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("PRODFIND_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `PRODFIND_ENDPOINT`: Override catalog endpoint
/// - `PRODFIND_DEBOUNCE_MS`: Override debounce delay (ignored with a warning
///   if not a number)
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(endpoint) = std::env::var("PRODFIND_ENDPOINT") {
        config.endpoint = endpoint;
    }

    if let Ok(raw) = std::env::var("PRODFIND_DEBOUNCE_MS") {
        match raw.trim().parse::<u64>() {
            Ok(ms) => config.debounce = Duration::from_millis(ms),
            Err(e) => warn!(value = %raw, error = %e, "Ignoring invalid PRODFIND_DEBOUNCE_MS"),
        }
    }

    config
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        endpoint: config.endpoint.unwrap_or(defaults.endpoint),
        debounce: config
            .debounce_ms
            .map(Duration::from_millis)
            .unwrap_or(defaults.debounce),
        request_timeout: config
            .request_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout),
        retries: config.retries.unwrap_or(defaults.retries),
        stale_after: config
            .stale_after_ms
            .map(Duration::from_millis)
            .unwrap_or(defaults.stale_after),
        cache_ttl: config
            .cache_ttl_secs
            .map(Duration::from_secs)
            .unwrap_or(defaults.cache_ttl),
        cache_capacity: config.cache_capacity.unwrap_or(defaults.cache_capacity),
        page_size: config.page_size.unwrap_or(defaults.page_size),
        forward_query_params: config
            .forward_query_params
            .unwrap_or(defaults.forward_query_params),
        nav_policy: config.nav_policy.unwrap_or(defaults.nav_policy),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    endpoint_override: Option<String>,
    debounce_ms_override: Option<u64>,
    nav_override: Option<NavPolicy>,
) -> ResolvedConfig {
    if let Some(endpoint) = endpoint_override {
        config.endpoint = endpoint;
    }

    if let Some(ms) = debounce_ms_override {
        config.debounce = Duration::from_millis(ms);
    }

    if let Some(nav) = nav_override {
        config.nav_policy = nav;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
