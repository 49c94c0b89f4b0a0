use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};

use super::{player_property, tool_spec, unix_time, Tool};
use crate::enrich::{app_names, enrich_or_degrade};
use crate::services::SteamServices;
use crate::tool_source::{ToolCallContent, ToolSourceError, ToolSpec};
use crate::validate::resolve_player;

#[derive(Debug, Serialize)]
struct WishlistView {
    appid: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    priority: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    added: Option<String>,
}

pub struct WishlistTool {
    services: Arc<SteamServices>,
}

impl WishlistTool {
    pub fn new(services: Arc<SteamServices>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl Tool for WishlistTool {
    fn name(&self) -> &str {
        "get_wishlist"
    }

    fn spec(&self) -> ToolSpec {
        tool_spec(
            self.name(),
            "A player's public wishlist in priority order, with app names.",
            json!({
                "type": "object",
                "properties": { "steamid": player_property() },
                "required": ["steamid"]
            }),
        )
    }

    async fn call(&self, args: Value) -> Result<ToolCallContent, ToolSourceError> {
        let steamid = resolve_player(&self.services.gateway, &args, "steamid").await?;
        let mut items = self.services.gateway.wishlist(steamid).await?;
        // Priority 0 means unranked and goes last.
        items.sort_by_key(|i| (i.priority == 0, i.priority, i.appid));

        let services = &self.services;
        let hydrated = enrich_or_degrade(
            "wishlist app names",
            items,
            |i| Some(i.appid),
            |appids| app_names(services, appids),
        )
        .await;

        let items: Vec<WishlistView> = hydrated
            .into_iter()
            .map(|e| WishlistView {
                appid: e.record.appid,
                name: e.secondary,
                priority: e.record.priority,
                added: unix_time(e.record.date_added),
            })
            .collect();

        ToolCallContent::json(&json!({
            "steamid": steamid,
            "item_count": items.len(),
            "items": items,
        }))
    }
}
