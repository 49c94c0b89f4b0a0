//! # steam-mcp
//!
//! The Steam Web API exposed as tools for AI agents over the Model Context Protocol.
//!
//! A tool call is validated, turned into one or more gateway calls, and the JSON
//! responses are reshaped and enriched into agent-readable text.
//!
//! ## Core pieces
//!
//! - **Bounded fan-out** ([`fanout`]): run one async call per item with at most N in
//!   flight ([`map_bounded`], [`try_map_bounded`]). Results come back in completion order.
//! - **Enrichment joins** ([`enrich`]): attach secondary lookups (player personas, app
//!   names, trade partners) to primary records by key, one lookup per distinct key,
//!   order preserved ([`enrich()`], [`enrich_or_degrade`]).
//! - **App catalog cache** ([`app_list`]): the full `GetAppList` snapshot, refreshed
//!   lazily once older than its TTL ([`AppListCache`]).
//!
//! ## Main modules
//!
//! - [`gateway`]: [`SteamGateway`] over an [`HttpClient`]; typed endpoint methods and records.
//! - [`error`]: [`SteamError`] taxonomy and message sanitizing.
//! - [`steam_id`]: [`SteamId`] and the 32-bit account id transform.
//! - [`validate`]: argument parsing for tools (SteamID64 / vanity names, app ids, bounded counts).
//! - [`tools`]: [`Tool`] trait, [`ToolRegistry`], the Steam tools and [`register_steam_tools`].
//! - [`mcp`]: [`McpServer`], newline-delimited JSON-RPC over any async reader/writer.
//! - [`services`]: [`SteamServices`], the shared handles every tool holds.

pub mod app_list;
pub mod enrich;
pub mod error;
pub mod fanout;
pub mod gateway;
pub mod mcp;
pub mod services;
pub mod steam_id;
pub mod tool_source;
pub mod tools;
pub mod validate;

pub use app_list::{AppListCache, AppListSource, DEFAULT_APP_LIST_TTL};
pub use enrich::{enrich, enrich_or_degrade, Enriched};
pub use error::SteamError;
pub use fanout::{map_bounded, try_map_bounded};
pub use gateway::{HttpClient, HttpResponse, ReqwestHttpClient, SteamGateway};
pub use mcp::McpServer;
pub use services::SteamServices;
pub use steam_id::SteamId;
pub use tool_source::{ToolCallContent, ToolSourceError, ToolSpec};
pub use tools::{register_steam_tools, Tool, ToolRegistry};
