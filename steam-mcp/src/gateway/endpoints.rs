//! Typed wrappers for the endpoints used by the tools.

use std::collections::HashMap;

use async_trait::async_trait;

use super::types::*;
use super::SteamGateway;
use crate::app_list::AppListSource;
use crate::error::SteamError;
use crate::steam_id::SteamId;

/// GetPlayerSummaries and GetPlayerBans accept at most this many ids per request.
pub const PLAYER_SUMMARIES_MAX_IDS: usize = 100;

/// Options for `IPlayerService/GetOwnedGames`.
#[derive(Debug, Clone, Copy)]
pub struct OwnedGamesQuery {
    pub include_appinfo: bool,
    pub include_played_free_games: bool,
}

impl Default for OwnedGamesQuery {
    fn default() -> Self {
        Self {
            include_appinfo: true,
            include_played_free_games: true,
        }
    }
}

/// Options for `IEconService/GetTradeOffers`.
#[derive(Debug, Clone, Copy)]
pub struct TradeOffersQuery {
    pub sent: bool,
    pub received: bool,
    pub active_only: bool,
}

fn flag(b: bool) -> String {
    let v = if b { "1" } else { "0" };
    v.to_string()
}

fn join_ids(ids: &[SteamId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn check_batch(ids: &[SteamId]) -> Result<(), SteamError> {
    if ids.len() > PLAYER_SUMMARIES_MAX_IDS {
        return Err(SteamError::Validation(format!(
            "at most {} ids per request, got {}",
            PLAYER_SUMMARIES_MAX_IDS,
            ids.len()
        )));
    }
    Ok(())
}

impl SteamGateway {
    /// `ISteamUser/ResolveVanityURL`. A vanity name with no match is [`SteamError::NotFound`].
    pub async fn resolve_vanity_url(&self, vanity: &str) -> Result<SteamId, SteamError> {
        let out: ResponseEnvelope<VanityResolution> = self
            .call(
                "ISteamUser",
                "ResolveVanityURL",
                1,
                &[("vanityurl", vanity.to_string())],
            )
            .await?;
        match (out.response.success, out.response.steamid) {
            (1, Some(id)) => Ok(id),
            _ => Err(SteamError::NotFound(format!(
                "no profile with vanity name '{}'",
                vanity
            ))),
        }
    }

    /// `ISteamUser/GetPlayerSummaries/v2` for up to [`PLAYER_SUMMARIES_MAX_IDS`] ids.
    pub async fn player_summaries(&self, ids: &[SteamId]) -> Result<Vec<PlayerSummary>, SteamError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        check_batch(ids)?;
        let out: ResponseEnvelope<PlayerSummaries> = self
            .call(
                "ISteamUser",
                "GetPlayerSummaries",
                2,
                &[("steamids", join_ids(ids))],
            )
            .await?;
        Ok(out.response.players)
    }

    /// `ISteamUser/GetFriendList`. Private friend lists answer 401 ([`SteamError::Authorization`]).
    pub async fn friend_list(&self, steamid: SteamId) -> Result<Vec<Friend>, SteamError> {
        let out: FriendListEnvelope = self
            .call(
                "ISteamUser",
                "GetFriendList",
                1,
                &[
                    ("steamid", steamid.to_string()),
                    ("relationship", "friend".to_string()),
                ],
            )
            .await?;
        Ok(out.friendslist.friends)
    }

    /// `ISteamUser/GetPlayerBans` for up to [`PLAYER_SUMMARIES_MAX_IDS`] ids.
    pub async fn player_bans(&self, ids: &[SteamId]) -> Result<Vec<PlayerBan>, SteamError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        check_batch(ids)?;
        let out: PlayerBansEnvelope = self
            .call("ISteamUser", "GetPlayerBans", 1, &[("steamids", join_ids(ids))])
            .await?;
        Ok(out.players)
    }

    pub async fn steam_level(&self, steamid: SteamId) -> Result<Option<u32>, SteamError> {
        let out: ResponseEnvelope<SteamLevel> = self
            .call(
                "IPlayerService",
                "GetSteamLevel",
                1,
                &[("steamid", steamid.to_string())],
            )
            .await?;
        Ok(out.response.player_level)
    }

    /// `IPlayerService/GetOwnedGames`. A private library decodes to an empty list.
    pub async fn owned_games(
        &self,
        steamid: SteamId,
        query: OwnedGamesQuery,
    ) -> Result<OwnedGames, SteamError> {
        let out: ResponseEnvelope<OwnedGames> = self
            .call(
                "IPlayerService",
                "GetOwnedGames",
                1,
                &[
                    ("steamid", steamid.to_string()),
                    ("include_appinfo", flag(query.include_appinfo)),
                    ("include_played_free_games", flag(query.include_played_free_games)),
                ],
            )
            .await?;
        Ok(out.response)
    }

    pub async fn recently_played_games(
        &self,
        steamid: SteamId,
        count: u32,
    ) -> Result<RecentlyPlayedGames, SteamError> {
        let out: ResponseEnvelope<RecentlyPlayedGames> = self
            .call(
                "IPlayerService",
                "GetRecentlyPlayedGames",
                1,
                &[("steamid", steamid.to_string()), ("count", count.to_string())],
            )
            .await?;
        Ok(out.response)
    }

    pub async fn badges(&self, steamid: SteamId) -> Result<Badges, SteamError> {
        let out: ResponseEnvelope<Badges> = self
            .call(
                "IPlayerService",
                "GetBadges",
                1,
                &[("steamid", steamid.to_string())],
            )
            .await?;
        Ok(out.response)
    }

    /// `ISteamUserStats/GetPlayerAchievements`. Games without stats come back as
    /// `success: false`, which is reported as [`SteamError::PartialDataUnavailable`].
    pub async fn player_achievements(
        &self,
        steamid: SteamId,
        appid: u32,
    ) -> Result<PlayerAchievements, SteamError> {
        let out: PlayerStatsEnvelope<PlayerAchievements> = self
            .call(
                "ISteamUserStats",
                "GetPlayerAchievements",
                1,
                &[
                    ("steamid", steamid.to_string()),
                    ("appid", appid.to_string()),
                    ("l", "english".to_string()),
                ],
            )
            .await?;
        if !out.playerstats.success {
            return Err(SteamError::PartialDataUnavailable(
                out.playerstats
                    .error
                    .unwrap_or_else(|| format!("no achievement data for app {}", appid)),
            ));
        }
        Ok(out.playerstats)
    }

    pub async fn game_schema(&self, appid: u32) -> Result<GameSchema, SteamError> {
        let out: GameSchemaEnvelope = self
            .call(
                "ISteamUserStats",
                "GetSchemaForGame",
                2,
                &[("appid", appid.to_string()), ("l", "english".to_string())],
            )
            .await?;
        Ok(out.game)
    }

    pub async fn global_achievement_percentages(
        &self,
        appid: u32,
    ) -> Result<Vec<GlobalAchievementPercentage>, SteamError> {
        let out: GlobalPercentagesEnvelope = self
            .call(
                "ISteamUserStats",
                "GetGlobalAchievementPercentagesForApp",
                2,
                &[("gameid", appid.to_string())],
            )
            .await?;
        Ok(out.achievementpercentages.achievements)
    }

    pub async fn current_players(&self, appid: u32) -> Result<u32, SteamError> {
        let out: ResponseEnvelope<CurrentPlayers> = self
            .call(
                "ISteamUserStats",
                "GetNumberOfCurrentPlayers",
                1,
                &[("appid", appid.to_string())],
            )
            .await?;
        match (out.response.result, out.response.player_count) {
            (1, Some(n)) => Ok(n),
            _ => Err(SteamError::NotFound(format!(
                "no player count for app {}",
                appid
            ))),
        }
    }

    pub async fn user_stats_for_game(
        &self,
        steamid: SteamId,
        appid: u32,
    ) -> Result<UserStats, SteamError> {
        let out: PlayerStatsEnvelope<UserStats> = self
            .call(
                "ISteamUserStats",
                "GetUserStatsForGame",
                2,
                &[("steamid", steamid.to_string()), ("appid", appid.to_string())],
            )
            .await?;
        Ok(out.playerstats)
    }

    pub async fn app_news(
        &self,
        appid: u32,
        count: u32,
        max_length: u32,
    ) -> Result<Vec<NewsItem>, SteamError> {
        let out: NewsEnvelope = self
            .call(
                "ISteamNews",
                "GetNewsForApp",
                2,
                &[
                    ("appid", appid.to_string()),
                    ("count", count.to_string()),
                    ("maxlength", max_length.to_string()),
                ],
            )
            .await?;
        Ok(out.appnews.newsitems)
    }

    pub async fn trade_offers(&self, query: TradeOffersQuery) -> Result<TradeOffers, SteamError> {
        let out: ResponseEnvelope<TradeOffers> = self
            .call(
                "IEconService",
                "GetTradeOffers",
                1,
                &[
                    ("get_sent_offers", flag(query.sent)),
                    ("get_received_offers", flag(query.received)),
                    ("active_only", flag(query.active_only)),
                    ("get_descriptions", flag(false)),
                ],
            )
            .await?;
        Ok(out.response)
    }

    pub async fn wishlist(&self, steamid: SteamId) -> Result<Vec<WishlistItem>, SteamError> {
        let out: ResponseEnvelope<Wishlist> = self
            .call(
                "IWishlistService",
                "GetWishlist",
                1,
                &[("steamid", steamid.to_string())],
            )
            .await?;
        Ok(out.response.items)
    }

    /// Storefront `api/appdetails` for a single app. Unknown or region-locked apps are
    /// [`SteamError::NotFound`].
    pub async fn app_details(&self, appid: u32) -> Result<AppDetails, SteamError> {
        let mut out: HashMap<String, StoreAppDetailsEntry> = self
            .store_get("api/appdetails", &[("appids", appid.to_string())])
            .await?;
        match out.remove(&appid.to_string()) {
            Some(StoreAppDetailsEntry {
                success: true,
                data: Some(details),
            }) => Ok(details),
            _ => Err(SteamError::NotFound(format!(
                "no store page for app {}",
                appid
            ))),
        }
    }
}

#[async_trait]
impl AppListSource for SteamGateway {
    async fn fetch_app_list(&self) -> Result<Vec<AppEntry>, SteamError> {
        let out: AppListEnvelope = self.call("ISteamApps", "GetAppList", 2, &[]).await?;
        Ok(out.applist.apps)
    }
}
