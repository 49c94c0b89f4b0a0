//! Response records for the Steam endpoints the tools consume.
//!
//! Every field the remote may omit (private profiles, games without stats) is
//! `#[serde(default)]` so that a thin response decodes to an empty record instead
//! of a decode failure.

use serde::{Deserialize, Deserializer, Serialize};

use crate::steam_id::SteamId;

/// The common `{"response": {...}}` wrapper.
#[derive(Debug, Deserialize)]
pub struct ResponseEnvelope<T> {
    pub response: T,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VanityResolution {
    /// 1 = match, 42 = no match.
    pub success: u32,
    #[serde(default)]
    pub steamid: Option<SteamId>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerSummaries {
    #[serde(default)]
    pub players: Vec<PlayerSummary>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerSummary {
    pub steamid: SteamId,
    #[serde(default)]
    pub personaname: String,
    #[serde(default)]
    pub profileurl: Option<String>,
    #[serde(default)]
    pub avatarfull: Option<String>,
    /// 0 offline, 1 online, 2 busy, 3 away, 4 snooze, 5 looking to trade, 6 looking to play.
    #[serde(default)]
    pub personastate: u8,
    /// 1 private or friends-only, 3 public.
    #[serde(default)]
    pub communityvisibilitystate: u8,
    #[serde(default)]
    pub lastlogoff: Option<i64>,
    #[serde(default)]
    pub timecreated: Option<i64>,
    #[serde(default)]
    pub gameextrainfo: Option<String>,
    #[serde(default)]
    pub gameid: Option<String>,
    #[serde(default)]
    pub loccountrycode: Option<String>,
    #[serde(default)]
    pub realname: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FriendListEnvelope {
    #[serde(default)]
    pub friendslist: FriendList,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FriendList {
    #[serde(default)]
    pub friends: Vec<Friend>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Friend {
    pub steamid: SteamId,
    #[serde(default)]
    pub relationship: String,
    #[serde(default)]
    pub friend_since: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct PlayerBansEnvelope {
    #[serde(default)]
    pub players: Vec<PlayerBan>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerBan {
    #[serde(rename(deserialize = "SteamId"))]
    pub steam_id: SteamId,
    #[serde(rename(deserialize = "CommunityBanned"), default)]
    pub community_banned: bool,
    #[serde(rename(deserialize = "VACBanned"), default)]
    pub vac_banned: bool,
    #[serde(rename(deserialize = "NumberOfVACBans"), default)]
    pub number_of_vac_bans: u32,
    #[serde(rename(deserialize = "DaysSinceLastBan"), default)]
    pub days_since_last_ban: u32,
    #[serde(rename(deserialize = "NumberOfGameBans"), default)]
    pub number_of_game_bans: u32,
    #[serde(rename(deserialize = "EconomyBan"), default)]
    pub economy_ban: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SteamLevel {
    #[serde(default)]
    pub player_level: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OwnedGames {
    #[serde(default)]
    pub game_count: u32,
    #[serde(default)]
    pub games: Vec<OwnedGame>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OwnedGame {
    pub appid: u32,
    #[serde(default)]
    pub name: Option<String>,
    /// Minutes.
    #[serde(default)]
    pub playtime_forever: u32,
    #[serde(default)]
    pub playtime_2weeks: Option<u32>,
    #[serde(default)]
    pub rtime_last_played: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecentlyPlayedGames {
    #[serde(default)]
    pub total_count: u32,
    #[serde(default)]
    pub games: Vec<OwnedGame>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Badges {
    #[serde(default)]
    pub badges: Vec<Badge>,
    #[serde(default)]
    pub player_xp: Option<u32>,
    #[serde(default)]
    pub player_level: Option<u32>,
    #[serde(default)]
    pub player_xp_needed_to_level_up: Option<u32>,
    #[serde(default)]
    pub player_xp_needed_current_level: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Badge {
    pub badgeid: u32,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub completion_time: i64,
    #[serde(default)]
    pub xp: u32,
    #[serde(default)]
    pub scarcity: u64,
    /// Present only for game badges.
    #[serde(default)]
    pub appid: Option<u32>,
    #[serde(default)]
    pub border_color: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct PlayerStatsEnvelope<T> {
    pub playerstats: T,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerAchievements {
    #[serde(rename = "gameName", default)]
    pub game_name: Option<String>,
    #[serde(default)]
    pub achievements: Vec<PlayerAchievement>,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerAchievement {
    pub apiname: String,
    #[serde(default)]
    pub achieved: u8,
    #[serde(default)]
    pub unlocktime: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GameSchemaEnvelope {
    #[serde(default)]
    pub game: GameSchema,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GameSchema {
    #[serde(rename = "gameName", default)]
    pub game_name: Option<String>,
    #[serde(rename = "gameVersion", default)]
    pub game_version: Option<String>,
    #[serde(rename = "availableGameStats", default)]
    pub available_game_stats: AvailableGameStats,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AvailableGameStats {
    #[serde(default)]
    pub achievements: Vec<SchemaAchievement>,
    #[serde(default)]
    pub stats: Vec<SchemaStat>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SchemaAchievement {
    pub name: String,
    #[serde(rename(deserialize = "displayName"), default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub hidden: u8,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SchemaStat {
    pub name: String,
    #[serde(rename(deserialize = "displayName"), default)]
    pub display_name: Option<String>,
    #[serde(rename(deserialize = "defaultvalue"), default)]
    pub default_value: f64,
}

#[derive(Debug, Deserialize)]
pub struct GlobalPercentagesEnvelope {
    #[serde(default)]
    pub achievementpercentages: GlobalPercentages,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GlobalPercentages {
    #[serde(default)]
    pub achievements: Vec<GlobalAchievementPercentage>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GlobalAchievementPercentage {
    pub name: String,
    #[serde(deserialize_with = "number_or_string")]
    pub percent: f64,
}

/// The percentages endpoint has returned both `12.5` and `"12.5"` over time.
fn number_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }
    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurrentPlayers {
    #[serde(default)]
    pub player_count: Option<u32>,
    #[serde(default)]
    pub result: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserStats {
    #[serde(rename = "gameName", default)]
    pub game_name: Option<String>,
    #[serde(default)]
    pub stats: Vec<UserStat>,
    #[serde(default)]
    pub achievements: Vec<UserStatAchievement>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserStat {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserStatAchievement {
    pub name: String,
    #[serde(default)]
    pub achieved: u8,
}

#[derive(Debug, Deserialize)]
pub struct NewsEnvelope {
    pub appnews: AppNews,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppNews {
    pub appid: u32,
    #[serde(default)]
    pub newsitems: Vec<NewsItem>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewsItem {
    pub gid: String,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub contents: String,
    #[serde(default)]
    pub feedlabel: String,
    #[serde(default)]
    pub date: i64,
}

#[derive(Debug, Deserialize)]
pub struct AppListEnvelope {
    pub applist: AppListBody,
}

#[derive(Debug, Deserialize)]
pub struct AppListBody {
    #[serde(default)]
    pub apps: Vec<AppEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AppEntry {
    pub appid: u32,
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TradeOffers {
    #[serde(default)]
    pub trade_offers_sent: Vec<TradeOffer>,
    #[serde(default)]
    pub trade_offers_received: Vec<TradeOffer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TradeOffer {
    pub tradeofferid: String,
    /// 32-bit account id of the other party.
    pub accountid_other: u32,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub expiration_time: i64,
    #[serde(default)]
    pub trade_offer_state: u8,
    #[serde(default)]
    pub items_to_give: Vec<TradeItem>,
    #[serde(default)]
    pub items_to_receive: Vec<TradeItem>,
    #[serde(default)]
    pub is_our_offer: bool,
    #[serde(default)]
    pub time_created: i64,
    #[serde(default)]
    pub time_updated: i64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TradeItem {
    pub appid: u32,
    #[serde(default)]
    pub contextid: String,
    #[serde(default)]
    pub assetid: String,
    #[serde(default)]
    pub classid: String,
    #[serde(default)]
    pub amount: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Wishlist {
    #[serde(default)]
    pub items: Vec<WishlistItem>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WishlistItem {
    pub appid: u32,
    #[serde(default)]
    pub priority: u32,
    #[serde(default)]
    pub date_added: i64,
}

/// One entry of the storefront `appdetails` map.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreAppDetailsEntry {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<AppDetails>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppDetails {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub name: String,
    pub steam_appid: u32,
    #[serde(default)]
    pub is_free: bool,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub developers: Vec<String>,
    #[serde(default)]
    pub publishers: Vec<String>,
    #[serde(default)]
    pub release_date: Option<ReleaseDate>,
    #[serde(default)]
    pub price_overview: Option<PriceOverview>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub platforms: Option<Platforms>,
    #[serde(default)]
    pub metacritic: Option<Metacritic>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReleaseDate {
    #[serde(default)]
    pub coming_soon: bool,
    #[serde(default)]
    pub date: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PriceOverview {
    pub currency: String,
    /// Minor units (cents).
    pub initial: u64,
    #[serde(rename = "final")]
    pub final_price: u64,
    #[serde(default)]
    pub discount_percent: u32,
    #[serde(default)]
    pub final_formatted: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Genre {
    pub description: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Platforms {
    #[serde(default)]
    pub windows: bool,
    #[serde(default)]
    pub mac: bool,
    #[serde(default)]
    pub linux: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Metacritic {
    pub score: u32,
    #[serde(default)]
    pub url: Option<String>,
}
