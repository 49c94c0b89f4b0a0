//! Shared fixtures: an [`HttpClient`] routed by endpoint path and services built on it.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use steam_config::SteamConfig;
use steam_mcp::{HttpClient, HttpResponse, SteamError, SteamServices, ToolRegistry};

pub const API_KEY: &str = "test-api-key";
pub const PLAYER: &str = "76561197960287930";

type Handler = Box<dyn Fn(&HashMap<String, String>) -> HttpResponse + Send + Sync>;

/// Answers requests whose URL ends with a registered path; anything else is a 404.
/// Every request is recorded with its query.
#[derive(Default)]
pub struct RoutedHttpClient {
    routes: Vec<(String, Handler)>,
    calls: Mutex<Vec<(String, HashMap<String, String>)>>,
}

impl RoutedHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(
        mut self,
        path: &str,
        handler: impl Fn(&HashMap<String, String>) -> HttpResponse + Send + Sync + 'static,
    ) -> Self {
        self.routes.push((path.to_string(), Box::new(handler)));
        self
    }

    /// Fixed JSON answer with status 200.
    pub fn json(self, path: &str, body: Value) -> Self {
        self.status(path, 200, body)
    }

    pub fn status(self, path: &str, status: u16, body: Value) -> Self {
        let body = body.to_string();
        self.route(path, move |_| HttpResponse {
            status,
            body: body.clone(),
        })
    }

    /// Queries of every recorded request whose URL ends with `path`.
    pub fn calls_to(&self, path: &str) -> Vec<HashMap<String, String>> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(url, _)| url.ends_with(path))
            .map(|(_, q)| q.clone())
            .collect()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpClient for RoutedHttpClient {
    async fn get(&self, url: &str, query: &[(String, String)]) -> Result<HttpResponse, SteamError> {
        let query: HashMap<String, String> = query.iter().cloned().collect();
        self.calls.lock().unwrap().push((url.to_string(), query.clone()));
        // Yield so concurrent callers interleave like real I/O.
        tokio::task::yield_now().await;
        match self.routes.iter().find(|(path, _)| url.ends_with(path.as_str())) {
            Some((_, handler)) => Ok(handler(&query)),
            None => Ok(HttpResponse {
                status: 404,
                body: format!("no route for {}", url),
            }),
        }
    }
}

pub fn ok(body: Value) -> HttpResponse {
    HttpResponse {
        status: 200,
        body: body.to_string(),
    }
}

pub fn test_config() -> SteamConfig {
    let mut config = SteamConfig::with_api_key(API_KEY);
    config.api_base_url = "http://api.test".to_string();
    config.store_base_url = "http://store.test".to_string();
    config.fanout_concurrency = 4;
    config
}

pub fn services(http: Arc<RoutedHttpClient>) -> Arc<SteamServices> {
    Arc::new(SteamServices::with_http_client(&test_config(), http))
}

pub fn registry(http: Arc<RoutedHttpClient>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    steam_mcp::register_steam_tools(&mut registry, services(http));
    registry
}

/// Summary record as GetPlayerSummaries returns it.
pub fn summary(steamid: &str, name: &str) -> Value {
    serde_json::json!({
        "steamid": steamid,
        "personaname": name,
        "profileurl": format!("https://steamcommunity.com/profiles/{}/", steamid),
        "personastate": 1,
        "communityvisibilitystate": 3
    })
}

/// Store appdetails answer for one app.
pub fn app_details(appid: u32, name: &str) -> Value {
    serde_json::json!({
        (appid.to_string()): {
            "success": true,
            "data": { "type": "game", "name": name, "steam_appid": appid }
        }
    })
}

pub fn parse(text: &str) -> Value {
    serde_json::from_str(text).expect("tool output is JSON")
}
