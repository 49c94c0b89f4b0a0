//! App catalog tools: search, store details, news.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};

use super::{appid_property, tool_spec, unix_time, Tool};
use crate::gateway::types::{AppEntry, NewsItem};
use crate::services::SteamServices;
use crate::tool_source::{ToolCallContent, ToolSourceError, ToolSpec};
use crate::validate::{bounded_u32, require_appid, require_str};

/// Case-insensitive name search over the catalog.
///
/// Exact matches rank first, then prefix matches, then other substring matches;
/// within a rank, shorter names and then lower app ids come first.
pub(crate) fn search_catalog<'a>(apps: &'a [AppEntry], query: &str, limit: usize) -> Vec<&'a AppEntry> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    let mut hits: Vec<(u8, &AppEntry)> = apps
        .iter()
        .filter_map(|app| {
            let name = app.name.to_lowercase();
            if name == needle {
                Some((0, app))
            } else if name.starts_with(&needle) {
                Some((1, app))
            } else if name.contains(&needle) {
                Some((2, app))
            } else {
                None
            }
        })
        .collect();
    hits.sort_by(|(ra, a), (rb, b)| {
        ra.cmp(rb)
            .then(a.name.len().cmp(&b.name.len()))
            .then(a.appid.cmp(&b.appid))
    });
    hits.into_iter().take(limit).map(|(_, app)| app).collect()
}

pub struct SearchAppsTool {
    services: Arc<SteamServices>,
}

impl SearchAppsTool {
    pub fn new(services: Arc<SteamServices>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl Tool for SearchAppsTool {
    fn name(&self) -> &str {
        "search_apps"
    }

    fn spec(&self) -> ToolSpec {
        tool_spec(
            self.name(),
            "Find Steam app ids by name. Searches the full app catalog (refreshed daily).",
            json!({
                "type": "object",
                "properties": {
                    "query": { "type": "string", "description": "Part of the app name." },
                    "limit": { "type": "integer", "minimum": 1, "maximum": 100, "default": 20 }
                },
                "required": ["query"]
            }),
        )
    }

    async fn call(&self, args: Value) -> Result<ToolCallContent, ToolSourceError> {
        let query = require_str(&args, "query")?;
        let limit = bounded_u32(&args, "limit", 20, 1, 100) as usize;
        let catalog = self.services.app_list.get().await?;
        let matches = search_catalog(&catalog, query, limit);
        ToolCallContent::json(&json!({
            "query": query,
            "catalog_size": catalog.len(),
            "matches": matches,
        }))
    }
}

pub struct AppDetailsTool {
    services: Arc<SteamServices>,
}

impl AppDetailsTool {
    pub fn new(services: Arc<SteamServices>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl Tool for AppDetailsTool {
    fn name(&self) -> &str {
        "get_app_details"
    }

    fn spec(&self) -> ToolSpec {
        tool_spec(
            self.name(),
            "Store page details for an app: description, developers, price, genres, \
             platforms, release date and Metacritic score.",
            json!({
                "type": "object",
                "properties": { "appid": appid_property() },
                "required": ["appid"]
            }),
        )
    }

    async fn call(&self, args: Value) -> Result<ToolCallContent, ToolSourceError> {
        let appid = require_appid(&args, "appid")?;
        let details = self.services.gateway.app_details(appid).await?;
        ToolCallContent::json(&details)
    }
}

#[derive(Debug, Serialize)]
struct NewsView {
    title: String,
    url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    author: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    feed: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    published: Option<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    contents: String,
}

impl From<NewsItem> for NewsView {
    fn from(n: NewsItem) -> Self {
        Self {
            title: n.title,
            url: n.url,
            author: n.author,
            feed: n.feedlabel,
            published: unix_time(n.date),
            contents: n.contents,
        }
    }
}

pub struct AppNewsTool {
    services: Arc<SteamServices>,
}

impl AppNewsTool {
    pub fn new(services: Arc<SteamServices>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl Tool for AppNewsTool {
    fn name(&self) -> &str {
        "get_app_news"
    }

    fn spec(&self) -> ToolSpec {
        tool_spec(
            self.name(),
            "Latest news posts and patch notes for an app.",
            json!({
                "type": "object",
                "properties": {
                    "appid": appid_property(),
                    "count": { "type": "integer", "minimum": 1, "maximum": 20, "default": 5 },
                    "max_length": {
                        "type": "integer", "minimum": 0, "maximum": 5000, "default": 300,
                        "description": "Truncate contents to this many characters; 0 for full text."
                    }
                },
                "required": ["appid"]
            }),
        )
    }

    async fn call(&self, args: Value) -> Result<ToolCallContent, ToolSourceError> {
        let appid = require_appid(&args, "appid")?;
        let count = bounded_u32(&args, "count", 5, 1, 20);
        let max_length = bounded_u32(&args, "max_length", 300, 0, 5000);
        let items = self.services.gateway.app_news(appid, count, max_length).await?;
        let news: Vec<NewsView> = items.into_iter().map(NewsView::from).collect();
        ToolCallContent::json(&json!({ "appid": appid, "news": news }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(appid: u32, name: &str) -> AppEntry {
        AppEntry {
            appid,
            name: name.to_string(),
        }
    }

    #[test]
    fn search_ranks_exact_then_prefix_then_substring() {
        let catalog = vec![
            app(3, "Portal 2 Soundtrack"),
            app(620, "Portal 2"),
            app(400, "Portal"),
            app(9, "Aperture Portal Fan Game"),
            app(10, "Counter-Strike"),
        ];
        let ids: Vec<u32> = search_catalog(&catalog, "portal", 10)
            .iter()
            .map(|a| a.appid)
            .collect();
        assert_eq!(ids, vec![400, 620, 3, 9]);

        let limited = search_catalog(&catalog, "PORTAL 2", 1);
        assert_eq!(limited[0].appid, 620);
    }

    #[test]
    fn blank_query_matches_nothing() {
        let catalog = vec![app(1, "Anything")];
        assert!(search_catalog(&catalog, "  ", 10).is_empty());
        assert!(search_catalog(&catalog, "zzz", 10).is_empty());
    }
}
