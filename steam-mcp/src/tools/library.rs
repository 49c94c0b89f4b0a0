//! Library tools: owned and recently played games, cross-library achievement progress.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};

use super::{hours, player_property, tool_spec, unix_time, Tool};
use crate::fanout::map_bounded;
use crate::gateway::types::OwnedGame;
use crate::gateway::OwnedGamesQuery;
use crate::services::SteamServices;
use crate::tool_source::{ToolCallContent, ToolSourceError, ToolSpec};
use crate::validate::{bounded_u32, optional_bool, resolve_player};

#[derive(Debug, Serialize)]
struct GameView {
    appid: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    hours_total: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    hours_last_two_weeks: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_played: Option<String>,
}

impl From<OwnedGame> for GameView {
    fn from(g: OwnedGame) -> Self {
        Self {
            appid: g.appid,
            name: g.name,
            hours_total: hours(g.playtime_forever),
            hours_last_two_weeks: g.playtime_2weeks.map(hours),
            last_played: g.rtime_last_played.and_then(unix_time),
        }
    }
}

/// Most played first; ties by app id so the listing is stable.
fn sort_by_playtime(games: &mut [OwnedGame]) {
    games.sort_by(|a, b| {
        b.playtime_forever
            .cmp(&a.playtime_forever)
            .then(a.appid.cmp(&b.appid))
    });
}

pub struct OwnedGamesTool {
    services: Arc<SteamServices>,
}

impl OwnedGamesTool {
    pub fn new(services: Arc<SteamServices>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl Tool for OwnedGamesTool {
    fn name(&self) -> &str {
        "get_owned_games"
    }

    fn spec(&self) -> ToolSpec {
        tool_spec(
            self.name(),
            "List the games a player owns, most played first, with total and recent playtime \
             in hours. Private libraries return an empty list.",
            json!({
                "type": "object",
                "properties": {
                    "steamid": player_property(),
                    "limit": {
                        "type": "integer", "minimum": 1, "maximum": 5000, "default": 50,
                        "description": "Maximum number of games to return."
                    },
                    "include_free_games": {
                        "type": "boolean", "default": true,
                        "description": "Include free-to-play games the player has launched."
                    }
                },
                "required": ["steamid"]
            }),
        )
    }

    async fn call(&self, args: Value) -> Result<ToolCallContent, ToolSourceError> {
        let gateway = &self.services.gateway;
        let steamid = resolve_player(gateway, &args, "steamid").await?;
        let limit = bounded_u32(&args, "limit", 50, 1, 5000) as usize;
        let query = OwnedGamesQuery {
            include_appinfo: true,
            include_played_free_games: optional_bool(&args, "include_free_games", true),
        };

        let owned = gateway.owned_games(steamid, query).await?;
        let mut games = owned.games;
        let total_minutes: u64 = games.iter().map(|g| g.playtime_forever as u64).sum();
        sort_by_playtime(&mut games);
        let listed: Vec<GameView> = games.into_iter().take(limit).map(GameView::from).collect();

        ToolCallContent::json(&json!({
            "steamid": steamid,
            "game_count": owned.game_count,
            "total_hours": (total_minutes as f64 / 6.0).round() / 10.0,
            "returned": listed.len(),
            "games": listed,
        }))
    }
}

pub struct RecentlyPlayedGamesTool {
    services: Arc<SteamServices>,
}

impl RecentlyPlayedGamesTool {
    pub fn new(services: Arc<SteamServices>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl Tool for RecentlyPlayedGamesTool {
    fn name(&self) -> &str {
        "get_recently_played_games"
    }

    fn spec(&self) -> ToolSpec {
        tool_spec(
            self.name(),
            "List games a player has played in the last two weeks.",
            json!({
                "type": "object",
                "properties": {
                    "steamid": player_property(),
                    "count": {
                        "type": "integer", "minimum": 1, "maximum": 100, "default": 10
                    }
                },
                "required": ["steamid"]
            }),
        )
    }

    async fn call(&self, args: Value) -> Result<ToolCallContent, ToolSourceError> {
        let gateway = &self.services.gateway;
        let steamid = resolve_player(gateway, &args, "steamid").await?;
        let count = bounded_u32(&args, "count", 10, 1, 100);
        let recent = gateway.recently_played_games(steamid, count).await?;
        let games: Vec<GameView> = recent.games.into_iter().map(GameView::from).collect();
        ToolCallContent::json(&json!({
            "steamid": steamid,
            "total_count": recent.total_count,
            "games": games,
        }))
    }
}

/// Achievement completion of one game.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub(crate) struct GameProgress {
    pub appid: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub unlocked: usize,
    pub total: usize,
    pub percent: f64,
    pub hours_total: f64,
}

impl GameProgress {
    fn new(appid: u32, name: Option<String>, unlocked: usize, total: usize, minutes: u32) -> Self {
        let percent = if total == 0 {
            0.0
        } else {
            (unlocked as f64 * 1000.0 / total as f64).round() / 10.0
        };
        Self {
            appid,
            name,
            unlocked,
            total,
            percent,
            hours_total: hours(minutes),
        }
    }
}

/// Highest completion first, then app id.
pub(crate) fn sort_progress(progress: &mut [GameProgress]) {
    progress.sort_by(|a, b| {
        b.percent
            .total_cmp(&a.percent)
            .then(a.appid.cmp(&b.appid))
    });
}

pub struct AchievementProgressTool {
    services: Arc<SteamServices>,
}

impl AchievementProgressTool {
    pub fn new(services: Arc<SteamServices>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl Tool for AchievementProgressTool {
    fn name(&self) -> &str {
        "get_achievement_progress"
    }

    fn spec(&self) -> ToolSpec {
        tool_spec(
            self.name(),
            "Achievement completion across a player's most played games. Games without \
             achievements or with private stats are skipped.",
            json!({
                "type": "object",
                "properties": {
                    "steamid": player_property(),
                    "max_games": {
                        "type": "integer", "minimum": 1, "maximum": 200, "default": 50,
                        "description": "How many of the most played games to inspect."
                    }
                },
                "required": ["steamid"]
            }),
        )
    }

    async fn call(&self, args: Value) -> Result<ToolCallContent, ToolSourceError> {
        let gateway = &self.services.gateway;
        let steamid = resolve_player(gateway, &args, "steamid").await?;
        let max_games = bounded_u32(&args, "max_games", 50, 1, 200) as usize;

        let mut games = gateway
            .owned_games(steamid, OwnedGamesQuery::default())
            .await?
            .games;
        sort_by_playtime(&mut games);
        games.truncate(max_games);
        let inspected = games.len();

        let mut progress = map_bounded(games, self.services.fanout_limit, |game| async move {
            match gateway.player_achievements(steamid, game.appid).await {
                Ok(stats) if !stats.achievements.is_empty() => {
                    let unlocked = stats.achievements.iter().filter(|a| a.achieved == 1).count();
                    Some(GameProgress::new(
                        game.appid,
                        game.name.or(stats.game_name),
                        unlocked,
                        stats.achievements.len(),
                        game.playtime_forever,
                    ))
                }
                Ok(_) => None,
                Err(e) => {
                    tracing::debug!(appid = game.appid, error = %e, "no achievement data");
                    None
                }
            }
        })
        .await;
        sort_progress(&mut progress);

        let unlocked: usize = progress.iter().map(|p| p.unlocked).sum();
        let total: usize = progress.iter().map(|p| p.total).sum();
        let perfect = progress.iter().filter(|p| p.total > 0 && p.unlocked == p.total).count();

        ToolCallContent::json(&json!({
            "steamid": steamid,
            "games_inspected": inspected,
            "games_with_achievements": progress.len(),
            "perfect_games": perfect,
            "achievements_unlocked": unlocked,
            "achievements_total": total,
            "games": progress,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(appid: u32, minutes: u32) -> OwnedGame {
        OwnedGame {
            appid,
            name: None,
            playtime_forever: minutes,
            playtime_2weeks: None,
            rtime_last_played: None,
        }
    }

    #[test]
    fn playtime_sort_is_descending_and_stable() {
        let mut games = vec![game(30, 5), game(10, 500), game(20, 5), game(40, 0)];
        sort_by_playtime(&mut games);
        let ids: Vec<u32> = games.iter().map(|g| g.appid).collect();
        assert_eq!(ids, vec![10, 20, 30, 40]);
    }

    #[test]
    fn progress_percent_and_order() {
        let mut progress = vec![
            GameProgress::new(7, None, 1, 3, 0),
            GameProgress::new(5, None, 10, 10, 60),
            GameProgress::new(3, None, 1, 3, 0),
            GameProgress::new(9, None, 0, 0, 0),
        ];
        sort_progress(&mut progress);
        let ids: Vec<u32> = progress.iter().map(|p| p.appid).collect();
        assert_eq!(ids, vec![5, 3, 7, 9]);
        assert_eq!(progress[0].percent, 100.0);
        assert_eq!(progress[1].percent, 33.3);
        assert_eq!(progress[3].percent, 0.0);
        assert_eq!(progress[0].hours_total, 1.0);
    }
}
