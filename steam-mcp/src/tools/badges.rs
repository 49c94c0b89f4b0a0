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
struct BadgeView {
    badgeid: u32,
    level: u32,
    xp: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    appid: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    app_name: Option<String>,
    foil: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    earned: Option<String>,
    scarcity: u64,
}

/// Badges of a player, with the game name attached to game badges.
pub struct BadgesTool {
    services: Arc<SteamServices>,
}

impl BadgesTool {
    pub fn new(services: Arc<SteamServices>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl Tool for BadgesTool {
    fn name(&self) -> &str {
        "get_badges"
    }

    fn spec(&self) -> ToolSpec {
        tool_spec(
            self.name(),
            "A player's badges, XP and level progress. Game badges include the game name.",
            json!({
                "type": "object",
                "properties": { "steamid": player_property() },
                "required": ["steamid"]
            }),
        )
    }

    async fn call(&self, args: Value) -> Result<ToolCallContent, ToolSourceError> {
        let steamid = resolve_player(&self.services.gateway, &args, "steamid").await?;
        let mut response = self.services.gateway.badges(steamid).await?;
        response.badges.sort_by(|a, b| {
            b.completion_time
                .cmp(&a.completion_time)
                .then(a.badgeid.cmp(&b.badgeid))
        });

        let services = &self.services;
        let hydrated = enrich_or_degrade(
            "badge app names",
            response.badges,
            |b| b.appid,
            |appids| app_names(services, appids),
        )
        .await;

        let badges: Vec<BadgeView> = hydrated
            .into_iter()
            .map(|e| BadgeView {
                badgeid: e.record.badgeid,
                level: e.record.level,
                xp: e.record.xp,
                appid: e.record.appid,
                app_name: e.secondary,
                foil: e.record.border_color.unwrap_or(0) == 1,
                earned: unix_time(e.record.completion_time),
                scarcity: e.record.scarcity,
            })
            .collect();

        ToolCallContent::json(&json!({
            "steamid": steamid,
            "player_level": response.player_level,
            "player_xp": response.player_xp,
            "xp_to_next_level": response.player_xp_needed_to_level_up,
            "badge_count": badges.len(),
            "badges": badges,
        }))
    }
}
