//! Shared, process-lifetime handles the tools run against.

use std::sync::Arc;

use steam_config::SteamConfig;

use crate::app_list::AppListCache;
use crate::error::SteamError;
use crate::gateway::{HttpClient, ReqwestHttpClient, SteamGateway};

/// Gateway, catalog cache and fan-out width, built once and handed to every tool.
pub struct SteamServices {
    pub gateway: Arc<SteamGateway>,
    pub app_list: Arc<AppListCache>,
    /// Maximum concurrent per-item calls in a fan-out.
    pub fanout_limit: usize,
}

impl SteamServices {
    /// Builds services over the real HTTP stack.
    pub fn from_config(config: &SteamConfig) -> Result<Self, SteamError> {
        let http = Arc::new(ReqwestHttpClient::new(config.http_timeout)?);
        Ok(Self::with_http_client(config, http))
    }

    /// Builds services over a caller-provided transport (tests, proxies).
    pub fn with_http_client(config: &SteamConfig, http: Arc<dyn HttpClient>) -> Self {
        let gateway = Arc::new(SteamGateway::new(
            http,
            config.api_base_url.clone(),
            config.store_base_url.clone(),
            config.api_key.as_str(),
        ));
        let app_list = Arc::new(AppListCache::new(gateway.clone(), config.app_list_ttl));
        Self {
            gateway,
            app_list,
            fanout_limit: config.fanout_concurrency.max(1),
        }
    }
}
