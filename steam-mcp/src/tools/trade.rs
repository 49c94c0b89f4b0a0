//! Trade offers of the API key owner, with partner personas attached.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};

use super::{tool_spec, unix_time, Tool};
use crate::enrich::{enrich_or_degrade, player_summaries_by_account_id, Enriched};
use crate::gateway::types::{PlayerSummary, TradeItem, TradeOffer};
use crate::gateway::TradeOffersQuery;
use crate::services::SteamServices;
use crate::steam_id::SteamId;
use crate::tool_source::{ToolCallContent, ToolSourceError, ToolSpec};
use crate::validate::optional_bool;

/// Name of an `ETradeOfferState` value.
pub(crate) fn trade_state_label(state: u8) -> &'static str {
    match state {
        1 => "Invalid",
        2 => "Active",
        3 => "Accepted",
        4 => "Countered",
        5 => "Expired",
        6 => "Canceled",
        7 => "Declined",
        8 => "InvalidItems",
        9 => "CreatedNeedsConfirmation",
        10 => "CanceledBySecondFactor",
        11 => "InEscrow",
        _ => "Unknown",
    }
}

#[derive(Debug, Serialize)]
struct PartnerView {
    steamid: SteamId,
    account_id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    persona_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    profile_url: Option<String>,
}

#[derive(Debug, Serialize)]
struct OfferView {
    tradeofferid: String,
    direction: &'static str,
    state: &'static str,
    partner: PartnerView,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    items_to_give: Vec<TradeItem>,
    items_to_receive: Vec<TradeItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    updated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expires: Option<String>,
}

fn offer_view(e: Enriched<TradeOffer, PlayerSummary>) -> OfferView {
    let offer = e.record;
    OfferView {
        direction: if offer.is_our_offer { "sent" } else { "received" },
        state: trade_state_label(offer.trade_offer_state),
        partner: PartnerView {
            steamid: SteamId::from_account_id(offer.accountid_other),
            account_id: offer.accountid_other,
            persona_name: e.secondary.as_ref().map(|p| p.personaname.clone()),
            profile_url: e.secondary.and_then(|p| p.profileurl),
        },
        message: offer.message.filter(|m| !m.is_empty()),
        items_to_give: offer.items_to_give,
        items_to_receive: offer.items_to_receive,
        created: unix_time(offer.time_created),
        updated: unix_time(offer.time_updated),
        expires: unix_time(offer.expiration_time),
        tradeofferid: offer.tradeofferid,
    }
}

pub struct TradeOffersTool {
    services: Arc<SteamServices>,
}

impl TradeOffersTool {
    pub fn new(services: Arc<SteamServices>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl Tool for TradeOffersTool {
    fn name(&self) -> &str {
        "get_trade_offers"
    }

    fn spec(&self) -> ToolSpec {
        tool_spec(
            self.name(),
            "Trade offers sent and received by the owner of the configured API key, \
             with trade partner names.",
            json!({
                "type": "object",
                "properties": {
                    "sent": { "type": "boolean", "default": true },
                    "received": { "type": "boolean", "default": true },
                    "active_only": { "type": "boolean", "default": true }
                }
            }),
        )
    }

    async fn call(&self, args: Value) -> Result<ToolCallContent, ToolSourceError> {
        let query = TradeOffersQuery {
            sent: optional_bool(&args, "sent", true),
            received: optional_bool(&args, "received", true),
            active_only: optional_bool(&args, "active_only", true),
        };
        if !query.sent && !query.received {
            return Err(ToolSourceError::InvalidInput(
                "at least one of 'sent' or 'received' must be true".to_string(),
            ));
        }

        let gateway = &self.services.gateway;
        let response = gateway.trade_offers(query).await?;
        let mut offers = response.trade_offers_sent;
        offers.extend(response.trade_offers_received);
        offers.sort_by(|a, b| {
            b.time_created
                .cmp(&a.time_created)
                .then_with(|| a.tradeofferid.cmp(&b.tradeofferid))
        });

        let hydrated = enrich_or_degrade(
            "trade partner personas",
            offers,
            |o| Some(o.accountid_other),
            |account_ids| player_summaries_by_account_id(gateway, account_ids),
        )
        .await;
        let offers: Vec<OfferView> = hydrated.into_iter().map(offer_view).collect();

        ToolCallContent::json(&json!({
            "offer_count": offers.len(),
            "offers": offers,
        }))
    }
}
