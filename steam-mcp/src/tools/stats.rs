//! Per-game stats tools: achievements, schema, global rarity, player counts, raw stats.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};

use super::{appid_property, player_property, tool_spec, unix_time, Tool};
use crate::gateway::types::{GlobalAchievementPercentage, PlayerAchievement, SchemaAchievement};
use crate::services::SteamServices;
use crate::tool_source::{ToolCallContent, ToolSourceError, ToolSpec};
use crate::validate::{optional_bool, require_appid, resolve_player};

/// One achievement with the player's state, schema text and global unlock rate.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub(crate) struct AchievementView {
    pub apiname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub achieved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlocked_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_percent: Option<f64>,
    pub hidden: bool,
}

/// Joins the three achievement lists on api name. Player entries drive the output order.
pub(crate) fn merge_achievements(
    player: Vec<PlayerAchievement>,
    schema: &[SchemaAchievement],
    global: &[GlobalAchievementPercentage],
) -> Vec<AchievementView> {
    let schema: HashMap<&str, &SchemaAchievement> =
        schema.iter().map(|s| (s.name.as_str(), s)).collect();
    let global: HashMap<&str, f64> = global.iter().map(|g| (g.name.as_str(), g.percent)).collect();

    player
        .into_iter()
        .map(|a| {
            let def = schema.get(a.apiname.as_str());
            AchievementView {
                name: a
                    .name
                    .clone()
                    .or_else(|| def.and_then(|d| d.display_name.clone())),
                description: a
                    .description
                    .clone()
                    .filter(|d| !d.is_empty())
                    .or_else(|| def.and_then(|d| d.description.clone())),
                achieved: a.achieved == 1,
                unlocked_at: if a.achieved == 1 { unix_time(a.unlocktime) } else { None },
                global_percent: global.get(a.apiname.as_str()).map(|p| (p * 100.0).round() / 100.0),
                hidden: def.map(|d| d.hidden == 1).unwrap_or(false),
                apiname: a.apiname,
            }
        })
        .collect()
}

pub struct PlayerAchievementsTool {
    services: Arc<SteamServices>,
}

impl PlayerAchievementsTool {
    pub fn new(services: Arc<SteamServices>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl Tool for PlayerAchievementsTool {
    fn name(&self) -> &str {
        "get_player_achievements"
    }

    fn spec(&self) -> ToolSpec {
        tool_spec(
            self.name(),
            "A player's achievements for one game with names, descriptions, unlock times \
             and global unlock percentages.",
            json!({
                "type": "object",
                "properties": {
                    "steamid": player_property(),
                    "appid": appid_property(),
                    "unlocked_only": { "type": "boolean", "default": false }
                },
                "required": ["steamid", "appid"]
            }),
        )
    }

    async fn call(&self, args: Value) -> Result<ToolCallContent, ToolSourceError> {
        let gateway = &self.services.gateway;
        let appid = require_appid(&args, "appid")?;
        let steamid = resolve_player(gateway, &args, "steamid").await?;
        let unlocked_only = optional_bool(&args, "unlocked_only", false);

        let (player, schema, global) = tokio::join!(
            gateway.player_achievements(steamid, appid),
            gateway.game_schema(appid),
            gateway.global_achievement_percentages(appid),
        );
        let player = player?;
        let schema = schema
            .map(|s| s.available_game_stats.achievements)
            .unwrap_or_else(|e| {
                tracing::warn!(appid, error = %e, "achievement schema unavailable");
                Vec::new()
            });
        let global = global.unwrap_or_else(|e| {
            tracing::warn!(appid, error = %e, "global achievement percentages unavailable");
            Vec::new()
        });

        let game_name = player.game_name.clone();
        let mut achievements = merge_achievements(player.achievements, &schema, &global);
        let total = achievements.len();
        let unlocked = achievements.iter().filter(|a| a.achieved).count();
        if unlocked_only {
            achievements.retain(|a| a.achieved);
        }

        ToolCallContent::json(&json!({
            "steamid": steamid,
            "appid": appid,
            "game_name": game_name,
            "unlocked": unlocked,
            "total": total,
            "achievements": achievements,
        }))
    }
}

pub struct GameSchemaTool {
    services: Arc<SteamServices>,
}

impl GameSchemaTool {
    pub fn new(services: Arc<SteamServices>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl Tool for GameSchemaTool {
    fn name(&self) -> &str {
        "get_game_schema"
    }

    fn spec(&self) -> ToolSpec {
        tool_spec(
            self.name(),
            "Achievement and stat definitions for a game.",
            json!({
                "type": "object",
                "properties": { "appid": appid_property() },
                "required": ["appid"]
            }),
        )
    }

    async fn call(&self, args: Value) -> Result<ToolCallContent, ToolSourceError> {
        let appid = require_appid(&args, "appid")?;
        let schema = self.services.gateway.game_schema(appid).await?;
        let stats = schema.available_game_stats;
        ToolCallContent::json(&json!({
            "appid": appid,
            "game_name": schema.game_name,
            "game_version": schema.game_version,
            "achievement_count": stats.achievements.len(),
            "achievements": stats.achievements,
            "stats": stats.stats,
        }))
    }
}

pub struct GlobalAchievementPercentagesTool {
    services: Arc<SteamServices>,
}

impl GlobalAchievementPercentagesTool {
    pub fn new(services: Arc<SteamServices>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl Tool for GlobalAchievementPercentagesTool {
    fn name(&self) -> &str {
        "get_global_achievement_percentages"
    }

    fn spec(&self) -> ToolSpec {
        tool_spec(
            self.name(),
            "Percentage of all players who unlocked each achievement of a game, rarest first.",
            json!({
                "type": "object",
                "properties": { "appid": appid_property() },
                "required": ["appid"]
            }),
        )
    }

    async fn call(&self, args: Value) -> Result<ToolCallContent, ToolSourceError> {
        let appid = require_appid(&args, "appid")?;
        let mut achievements = self
            .services
            .gateway
            .global_achievement_percentages(appid)
            .await?;
        achievements.sort_by(|a, b| a.percent.total_cmp(&b.percent).then(a.name.cmp(&b.name)));
        ToolCallContent::json(&json!({
            "appid": appid,
            "achievements": achievements,
        }))
    }
}

pub struct CurrentPlayersTool {
    services: Arc<SteamServices>,
}

impl CurrentPlayersTool {
    pub fn new(services: Arc<SteamServices>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl Tool for CurrentPlayersTool {
    fn name(&self) -> &str {
        "get_current_players"
    }

    fn spec(&self) -> ToolSpec {
        tool_spec(
            self.name(),
            "Number of players currently in a game.",
            json!({
                "type": "object",
                "properties": { "appid": appid_property() },
                "required": ["appid"]
            }),
        )
    }

    async fn call(&self, args: Value) -> Result<ToolCallContent, ToolSourceError> {
        let appid = require_appid(&args, "appid")?;
        let players = self.services.gateway.current_players(appid).await?;
        ToolCallContent::json(&json!({ "appid": appid, "player_count": players }))
    }
}

pub struct UserStatsForGameTool {
    services: Arc<SteamServices>,
}

impl UserStatsForGameTool {
    pub fn new(services: Arc<SteamServices>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl Tool for UserStatsForGameTool {
    fn name(&self) -> &str {
        "get_user_stats_for_game"
    }

    fn spec(&self) -> ToolSpec {
        tool_spec(
            self.name(),
            "Raw gameplay stats a game records for a player (kills, wins, distance, ...).",
            json!({
                "type": "object",
                "properties": {
                    "steamid": player_property(),
                    "appid": appid_property()
                },
                "required": ["steamid", "appid"]
            }),
        )
    }

    async fn call(&self, args: Value) -> Result<ToolCallContent, ToolSourceError> {
        let gateway = &self.services.gateway;
        let appid = require_appid(&args, "appid")?;
        let steamid = resolve_player(gateway, &args, "steamid").await?;
        let stats = gateway.user_stats_for_game(steamid, appid).await?;
        let unlocked = stats.achievements.iter().filter(|a| a.achieved == 1).count();
        ToolCallContent::json(&json!({
            "steamid": steamid,
            "appid": appid,
            "game_name": stats.game_name,
            "stats": stats.stats,
            "achievements_unlocked": unlocked,
        }))
    }
}
