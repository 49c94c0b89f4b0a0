//! Steam Web API gateway: one request in, one typed record (or [`SteamError`]) out.
//!
//! [`HttpClient`] is the transport seam; [`ReqwestHttpClient`] is the real
//! implementation and tests plug in canned responses. [`SteamGateway`] attaches the
//! API key to every Web API call, maps HTTP status to the error taxonomy and decodes
//! the body into the record type the caller asks for.

mod endpoints;
pub mod types;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::{sanitize_message, SteamError};

pub use endpoints::{OwnedGamesQuery, TradeOffersQuery, PLAYER_SUMMARIES_MAX_IDS};

/// Default Web API host.
pub const DEFAULT_API_BASE_URL: &str = "https://api.steampowered.com";
/// Default storefront host.
pub const DEFAULT_STORE_BASE_URL: &str = "https://store.steampowered.com";

const ERROR_EXCERPT_CHARS: usize = 200;

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Performs GET requests. Abstraction for testing.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// GET `url` with the given query pairs. Transport failures map to [`SteamError::Network`].
    async fn get(&self, url: &str, query: &[(String, String)]) -> Result<HttpResponse, SteamError>;
}

/// Reqwest-based HTTP client.
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Builds a client with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self, SteamError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("steam-mcp/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SteamError::Network(e.without_url().to_string()))?;
        Ok(Self { client })
    }

    /// Wraps an existing client (custom proxies, TLS roots, ...).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &str, query: &[(String, String)]) -> Result<HttpResponse, SteamError> {
        // without_url: the query string carries the API key.
        let res = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| SteamError::Network(e.without_url().to_string()))?;
        let status = res.status().as_u16();
        let body = res
            .text()
            .await
            .map_err(|e| SteamError::Network(e.without_url().to_string()))?;
        Ok(HttpResponse { status, body })
    }
}

/// Stateless mapper from (interface, method, version, params) to typed records.
pub struct SteamGateway {
    http: Arc<dyn HttpClient>,
    api_base: String,
    store_base: String,
    api_key: Arc<str>,
}

impl SteamGateway {
    pub fn new(
        http: Arc<dyn HttpClient>,
        api_base: impl Into<String>,
        store_base: impl Into<String>,
        api_key: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            http,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            store_base: store_base.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Calls `{api_base}/{interface}/{method}/v{version}/` with `key` and `format=json` attached.
    pub async fn call<T: DeserializeOwned>(
        &self,
        interface: &str,
        method: &str,
        version: u32,
        params: &[(&str, String)],
    ) -> Result<T, SteamError> {
        let url = format!("{}/{}/{}/v{}/", self.api_base, interface, method, version);
        let mut query: Vec<(String, String)> = Vec::with_capacity(params.len() + 2);
        query.push(("key".to_string(), self.api_key.to_string()));
        query.push(("format".to_string(), "json".to_string()));
        query.extend(params.iter().map(|(k, v)| (k.to_string(), v.clone())));

        tracing::debug!(interface, method, version, "steam api call");
        let res = self.http.get(&url, &query).await.map_err(|e| self.scrub(e))?;
        self.decode(&format!("{}/{}", interface, method), res)
    }

    /// GETs `{store_base}/{path}` on the storefront host. No key is attached.
    pub async fn store_get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, SteamError> {
        let url = format!("{}/{}", self.store_base, path.trim_start_matches('/'));
        let query: Vec<(String, String)> = params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        tracing::debug!(path, "steam store call");
        let res = self.http.get(&url, &query).await.map_err(|e| self.scrub(e))?;
        self.decode(path, res)
    }

    fn decode<T: DeserializeOwned>(&self, what: &str, res: HttpResponse) -> Result<T, SteamError> {
        if !(200..300).contains(&res.status) {
            let excerpt = sanitize_message(&res.body, &self.api_key, ERROR_EXCERPT_CHARS);
            tracing::debug!(endpoint = what, status = res.status, "steam call failed");
            return Err(SteamError::from_status(res.status, &excerpt));
        }
        serde_json::from_str(&res.body).map_err(|e| {
            SteamError::Decode(format!(
                "{}: {}",
                what,
                sanitize_message(&e.to_string(), &self.api_key, ERROR_EXCERPT_CHARS)
            ))
        })
    }

    /// Redacts the key from transport errors produced by custom clients.
    fn scrub(&self, err: SteamError) -> SteamError {
        match err {
            SteamError::Network(m) => {
                SteamError::Network(sanitize_message(&m, &self.api_key, ERROR_EXCERPT_CHARS))
            }
            other => other,
        }
    }
}
