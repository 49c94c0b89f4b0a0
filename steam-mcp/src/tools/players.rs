//! Player identity tools: vanity resolution, summaries, friends, bans, level.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};

use super::{player_property, tool_spec, unix_time, Tool};
use crate::enrich::{enrich_or_degrade, player_summaries_by_id};
use crate::gateway::types::{PlayerBan, PlayerSummary};
use crate::gateway::PLAYER_SUMMARIES_MAX_IDS;
use crate::services::SteamServices;
use crate::steam_id::SteamId;
use crate::tool_source::{ToolCallContent, ToolSourceError, ToolSpec};
use crate::validate::{require_str, resolve_player, steam_id_list};

/// Upper bound on ids accepted by `get_player_summaries` in one call.
const SUMMARIES_MAX_INPUT_IDS: usize = 500;

pub(crate) fn persona_state_label(state: u8) -> &'static str {
    match state {
        0 => "offline",
        1 => "online",
        2 => "busy",
        3 => "away",
        4 => "snooze",
        5 => "looking to trade",
        6 => "looking to play",
        _ => "unknown",
    }
}

/// Agent-facing view of a player summary.
#[derive(Debug, Serialize)]
pub(crate) struct PlayerView {
    steamid: SteamId,
    persona_name: String,
    status: &'static str,
    public_profile: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    profile_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    real_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    playing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    account_created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_logoff: Option<String>,
}

impl From<PlayerSummary> for PlayerView {
    fn from(p: PlayerSummary) -> Self {
        Self {
            steamid: p.steamid,
            persona_name: p.personaname,
            status: persona_state_label(p.personastate),
            public_profile: p.communityvisibilitystate == 3,
            profile_url: p.profileurl,
            avatar: p.avatarfull,
            real_name: p.realname,
            country: p.loccountrycode,
            playing: p.gameextrainfo,
            account_created: p.timecreated.and_then(unix_time),
            last_logoff: p.lastlogoff.and_then(unix_time),
        }
    }
}

pub struct ResolveVanityUrlTool {
    services: Arc<SteamServices>,
}

impl ResolveVanityUrlTool {
    pub fn new(services: Arc<SteamServices>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl Tool for ResolveVanityUrlTool {
    fn name(&self) -> &str {
        "resolve_vanity_url"
    }

    fn spec(&self) -> ToolSpec {
        tool_spec(
            self.name(),
            "Resolve a Steam custom profile URL name (steamcommunity.com/id/<name>) to a SteamID64.",
            json!({
                "type": "object",
                "properties": {
                    "vanity_url": {
                        "type": "string",
                        "description": "Custom URL name, or a full steamcommunity.com/id/... URL."
                    }
                },
                "required": ["vanity_url"]
            }),
        )
    }

    async fn call(&self, args: Value) -> Result<ToolCallContent, ToolSourceError> {
        let raw = require_str(&args, "vanity_url")?;
        let name = raw
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or(raw)
            .to_string();
        let steamid = self.services.gateway.resolve_vanity_url(&name).await?;
        ToolCallContent::json(&json!({ "vanity_url": name, "steamid": steamid }))
    }
}

pub struct PlayerSummariesTool {
    services: Arc<SteamServices>,
}

impl PlayerSummariesTool {
    pub fn new(services: Arc<SteamServices>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl Tool for PlayerSummariesTool {
    fn name(&self) -> &str {
        "get_player_summaries"
    }

    fn spec(&self) -> ToolSpec {
        tool_spec(
            self.name(),
            "Get public profile summaries (persona name, online status, current game, country) \
             for one or more SteamID64s. Requests are batched 100 ids at a time.",
            json!({
                "type": "object",
                "properties": {
                    "steamids": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "SteamID64s (array or comma-separated string)."
                    }
                },
                "required": ["steamids"]
            }),
        )
    }

    async fn call(&self, args: Value) -> Result<ToolCallContent, ToolSourceError> {
        let ids = steam_id_list(&args, "steamids", SUMMARIES_MAX_INPUT_IDS)?;
        let mut found =
            player_summaries_by_id(&self.services.gateway, ids.iter().copied().collect()).await?;
        let players: Vec<PlayerView> = ids
            .iter()
            .filter_map(|id| found.remove(id))
            .map(PlayerView::from)
            .collect();
        let missing: Vec<SteamId> = ids
            .iter()
            .copied()
            .filter(|id| !players.iter().any(|p| p.steamid == *id))
            .collect();
        ToolCallContent::json(&json!({
            "players": players,
            "not_found": missing,
        }))
    }
}

#[derive(Debug, Serialize)]
struct FriendView {
    steamid: SteamId,
    #[serde(skip_serializing_if = "Option::is_none")]
    friend_since: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    persona_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    playing: Option<String>,
}

pub struct FriendListTool {
    services: Arc<SteamServices>,
}

impl FriendListTool {
    pub fn new(services: Arc<SteamServices>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl Tool for FriendListTool {
    fn name(&self) -> &str {
        "get_friend_list"
    }

    fn spec(&self) -> ToolSpec {
        tool_spec(
            self.name(),
            "List a player's friends with persona names and online status. \
             Fails when the friend list is private.",
            json!({
                "type": "object",
                "properties": { "steamid": player_property() },
                "required": ["steamid"]
            }),
        )
    }

    async fn call(&self, args: Value) -> Result<ToolCallContent, ToolSourceError> {
        let gateway = &self.services.gateway;
        let steamid = resolve_player(gateway, &args, "steamid").await?;
        let friends = gateway.friend_list(steamid).await?;
        let total = friends.len();

        let hydrated = enrich_or_degrade(
            "friend personas",
            friends,
            |f| Some(f.steamid),
            |ids| player_summaries_by_id(gateway, ids),
        )
        .await;

        let friends: Vec<FriendView> = hydrated
            .into_iter()
            .map(|e| FriendView {
                steamid: e.record.steamid,
                friend_since: unix_time(e.record.friend_since),
                persona_name: e.secondary.as_ref().map(|p| p.personaname.clone()),
                status: e.secondary.as_ref().map(|p| persona_state_label(p.personastate)),
                playing: e.secondary.and_then(|p| p.gameextrainfo),
            })
            .collect();

        ToolCallContent::json(&json!({
            "steamid": steamid,
            "friend_count": total,
            "friends": friends,
        }))
    }
}

pub struct PlayerBansTool {
    services: Arc<SteamServices>,
}

impl PlayerBansTool {
    pub fn new(services: Arc<SteamServices>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl Tool for PlayerBansTool {
    fn name(&self) -> &str {
        "get_player_bans"
    }

    fn spec(&self) -> ToolSpec {
        tool_spec(
            self.name(),
            "Get VAC, game, community and trade ban status for up to 100 SteamID64s.",
            json!({
                "type": "object",
                "properties": {
                    "steamids": {
                        "type": "array",
                        "items": { "type": "string" },
                        "maxItems": PLAYER_SUMMARIES_MAX_IDS,
                        "description": "SteamID64s (array or comma-separated string)."
                    }
                },
                "required": ["steamids"]
            }),
        )
    }

    async fn call(&self, args: Value) -> Result<ToolCallContent, ToolSourceError> {
        let ids = steam_id_list(&args, "steamids", PLAYER_SUMMARIES_MAX_IDS)?;
        let bans: Vec<PlayerBan> = self.services.gateway.player_bans(&ids).await?;
        ToolCallContent::json(&json!({ "players": bans }))
    }
}

pub struct SteamLevelTool {
    services: Arc<SteamServices>,
}

impl SteamLevelTool {
    pub fn new(services: Arc<SteamServices>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl Tool for SteamLevelTool {
    fn name(&self) -> &str {
        "get_steam_level"
    }

    fn spec(&self) -> ToolSpec {
        tool_spec(
            self.name(),
            "Get a player's Steam level.",
            json!({
                "type": "object",
                "properties": { "steamid": player_property() },
                "required": ["steamid"]
            }),
        )
    }

    async fn call(&self, args: Value) -> Result<ToolCallContent, ToolSourceError> {
        let steamid = resolve_player(&self.services.gateway, &args, "steamid").await?;
        let level = self.services.gateway.steam_level(steamid).await?;
        ToolCallContent::json(&json!({
            "steamid": steamid,
            "level": level,
            "visible": level.is_some(),
        }))
    }
}
