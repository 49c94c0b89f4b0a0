//! Tool trait, registry and the Steam tools.
//!
//! Every Steam tool holds an `Arc<SteamServices>` and returns pretty-printed JSON.
//! [`register_steam_tools`] installs the full set.

mod apps;
mod badges;
mod library;
mod players;
mod registry;
mod stats;
mod r#trait;
mod trade;
mod wishlist;

use std::sync::Arc;

use serde_json::{json, Value};

use crate::services::SteamServices;
use crate::tool_source::ToolSpec;

pub use apps::{AppDetailsTool, AppNewsTool, SearchAppsTool};
pub use badges::BadgesTool;
pub use library::{AchievementProgressTool, OwnedGamesTool, RecentlyPlayedGamesTool};
pub use players::{
    FriendListTool, PlayerBansTool, PlayerSummariesTool, ResolveVanityUrlTool, SteamLevelTool,
};
pub use r#trait::Tool;
pub use registry::ToolRegistry;
pub use stats::{
    CurrentPlayersTool, GameSchemaTool, GlobalAchievementPercentagesTool, PlayerAchievementsTool,
    UserStatsForGameTool,
};
pub use trade::TradeOffersTool;
pub use wishlist::WishlistTool;

/// Registers every Steam tool against `services`.
pub fn register_steam_tools(registry: &mut ToolRegistry, services: Arc<SteamServices>) {
    let tools: Vec<Arc<dyn Tool>> = vec![
        Arc::new(ResolveVanityUrlTool::new(services.clone())),
        Arc::new(PlayerSummariesTool::new(services.clone())),
        Arc::new(FriendListTool::new(services.clone())),
        Arc::new(PlayerBansTool::new(services.clone())),
        Arc::new(SteamLevelTool::new(services.clone())),
        Arc::new(OwnedGamesTool::new(services.clone())),
        Arc::new(RecentlyPlayedGamesTool::new(services.clone())),
        Arc::new(AchievementProgressTool::new(services.clone())),
        Arc::new(PlayerAchievementsTool::new(services.clone())),
        Arc::new(GameSchemaTool::new(services.clone())),
        Arc::new(GlobalAchievementPercentagesTool::new(services.clone())),
        Arc::new(CurrentPlayersTool::new(services.clone())),
        Arc::new(UserStatsForGameTool::new(services.clone())),
        Arc::new(AppNewsTool::new(services.clone())),
        Arc::new(SearchAppsTool::new(services.clone())),
        Arc::new(AppDetailsTool::new(services.clone())),
        Arc::new(BadgesTool::new(services.clone())),
        Arc::new(TradeOffersTool::new(services.clone())),
        Arc::new(WishlistTool::new(services)),
    ];
    for tool in tools {
        registry.register(tool);
    }
}

fn tool_spec(name: &str, description: &str, input_schema: Value) -> ToolSpec {
    ToolSpec {
        name: name.to_string(),
        description: Some(description.to_string()),
        input_schema,
    }
}

/// Schema property for a player given as SteamID64 or vanity name.
fn player_property() -> Value {
    json!({
        "type": "string",
        "description": "SteamID64 (17 digits) or custom profile URL name (vanity name)."
    })
}

fn appid_property() -> Value {
    json!({ "type": "integer", "minimum": 1, "description": "Steam app id, e.g. 440." })
}

/// RFC 3339 rendering of a Unix timestamp; 0 and out-of-range values are `None`.
fn unix_time(ts: i64) -> Option<String> {
    if ts <= 0 {
        return None;
    }
    chrono::DateTime::from_timestamp(ts, 0).map(|d| d.to_rfc3339())
}

fn hours(minutes: u32) -> f64 {
    (minutes as f64 / 60.0 * 10.0).round() / 10.0
}
