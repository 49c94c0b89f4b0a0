//! Typed Steam settings read from the environment.

use std::time::Duration;

use thiserror::Error;

pub const API_KEY: &str = "STEAM_API_KEY";
pub const API_BASE_URL: &str = "STEAM_API_BASE_URL";
pub const STORE_BASE_URL: &str = "STEAM_STORE_BASE_URL";
pub const FANOUT_CONCURRENCY: &str = "STEAM_FANOUT_CONCURRENCY";
pub const APP_LIST_TTL_SECS: &str = "STEAM_APP_LIST_TTL_SECS";
pub const HTTP_TIMEOUT_SECS: &str = "STEAM_HTTP_TIMEOUT_SECS";

const DEFAULT_API_BASE_URL: &str = "https://api.steampowered.com";
const DEFAULT_STORE_BASE_URL: &str = "https://store.steampowered.com";
const DEFAULT_FANOUT_CONCURRENCY: usize = 10;
const DEFAULT_APP_LIST_TTL_SECS: u64 = 24 * 60 * 60;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("{key}: invalid value '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Settings shared by the gateway, the app list cache and the fan-out.
#[derive(Clone, PartialEq, Eq)]
pub struct SteamConfig {
    pub api_key: String,
    pub api_base_url: String,
    pub store_base_url: String,
    /// Maximum in-flight calls per fan-out, at least 1.
    pub fanout_concurrency: usize,
    pub app_list_ttl: Duration,
    pub http_timeout: Duration,
}

impl std::fmt::Debug for SteamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SteamConfig")
            .field("api_key", &"***")
            .field("api_base_url", &self.api_base_url)
            .field("store_base_url", &self.store_base_url)
            .field("fanout_concurrency", &self.fanout_concurrency)
            .field("app_list_ttl", &self.app_list_ttl)
            .field("http_timeout", &self.http_timeout)
            .finish()
    }
}

impl SteamConfig {
    /// Defaults for everything but the key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            store_base_url: DEFAULT_STORE_BASE_URL.to_string(),
            fanout_concurrency: DEFAULT_FANOUT_CONCURRENCY,
            app_list_ttl: Duration::from_secs(DEFAULT_APP_LIST_TTL_SECS),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }

    /// Reads the process environment. Call after [`load_and_apply`](crate::load_and_apply).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = get(API_KEY).ok_or(ConfigError::Missing(API_KEY))?;
        let mut config = Self::with_api_key(api_key);
        if let Some(url) = get(API_BASE_URL) {
            config.api_base_url = url;
        }
        if let Some(url) = get(STORE_BASE_URL) {
            config.store_base_url = url;
        }
        if let Some(raw) = get(FANOUT_CONCURRENCY) {
            config.fanout_concurrency = match raw.parse::<usize>() {
                Ok(n) if n >= 1 => n,
                _ => return Err(invalid(FANOUT_CONCURRENCY, raw)),
            };
        }
        if let Some(raw) = get(APP_LIST_TTL_SECS) {
            config.app_list_ttl = Duration::from_secs(parse_secs(APP_LIST_TTL_SECS, raw)?);
        }
        if let Some(raw) = get(HTTP_TIMEOUT_SECS) {
            match parse_secs(HTTP_TIMEOUT_SECS, raw.clone())? {
                0 => return Err(invalid(HTTP_TIMEOUT_SECS, raw)),
                n => config.http_timeout = Duration::from_secs(n),
            }
        }
        Ok(config)
    }
}

fn invalid(key: &'static str, value: String) -> ConfigError {
    ConfigError::Invalid { key, value }
}

fn parse_secs(key: &'static str, raw: String) -> Result<u64, ConfigError> {
    raw.parse::<u64>().map_err(|_| invalid(key, raw))
}
