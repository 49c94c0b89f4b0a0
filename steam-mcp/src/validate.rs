//! Argument extraction and validation for tool calls.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::gateway::SteamGateway;
use crate::steam_id::SteamId;
use crate::tool_source::ToolSourceError;

static STEAM_ID64: Lazy<Regex> = Lazy::new(|| Regex::new(r"^7656119\d{10}$").unwrap());
static VANITY_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{2,32}$").unwrap());

/// How a caller named a player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerRef {
    Id(SteamId),
    Vanity(String),
}

pub fn parse_player_ref(input: &str) -> Result<PlayerRef, ToolSourceError> {
    let input = input.trim();
    if STEAM_ID64.is_match(input) {
        let id = input
            .parse()
            .map_err(|e: crate::steam_id::ParseSteamIdError| ToolSourceError::InvalidInput(e.to_string()))?;
        return Ok(PlayerRef::Id(id));
    }
    if VANITY_NAME.is_match(input) {
        return Ok(PlayerRef::Vanity(input.to_string()));
    }
    Err(ToolSourceError::InvalidInput(format!(
        "'{}' is neither a SteamID64 (17 digits starting with 7656119) nor a vanity name",
        input
    )))
}

/// Parses a strict SteamID64 (no vanity resolution).
pub fn parse_steam_id(input: &str) -> Result<SteamId, ToolSourceError> {
    match parse_player_ref(input)? {
        PlayerRef::Id(id) => Ok(id),
        PlayerRef::Vanity(v) => Err(ToolSourceError::InvalidInput(format!(
            "'{}' is not a SteamID64",
            v
        ))),
    }
}

pub fn require_str<'a>(args: &'a Value, field: &str) -> Result<&'a str, ToolSourceError> {
    args.get(field)
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ToolSourceError::InvalidInput(format!("missing '{}'", field)))
}

/// Reads `field` as a player reference and resolves vanity names to a SteamID64.
pub async fn resolve_player(
    gateway: &SteamGateway,
    args: &Value,
    field: &str,
) -> Result<SteamId, ToolSourceError> {
    match parse_player_ref(require_str(args, field)?)? {
        PlayerRef::Id(id) => Ok(id),
        PlayerRef::Vanity(name) => Ok(gateway.resolve_vanity_url(&name).await?),
    }
}

/// Reads a positive app id given as a number or a numeric string.
pub fn require_appid(args: &Value, field: &str) -> Result<u32, ToolSourceError> {
    let raw = args
        .get(field)
        .ok_or_else(|| ToolSourceError::InvalidInput(format!("missing '{}'", field)))?;
    let n = match raw {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    match n.and_then(|n| u32::try_from(n).ok()) {
        Some(id) if id > 0 => Ok(id),
        _ => Err(ToolSourceError::InvalidInput(format!(
            "'{}' must be a positive app id",
            field
        ))),
    }
}

/// Reads an optional integer, clamped to `[min, max]`.
pub fn bounded_u32(args: &Value, field: &str, default: u32, min: u32, max: u32) -> u32 {
    args.get(field)
        .and_then(|v| v.as_u64())
        .map(|n| n.min(max as u64) as u32)
        .unwrap_or(default)
        .clamp(min, max)
}

pub fn optional_bool(args: &Value, field: &str, default: bool) -> bool {
    args.get(field).and_then(|v| v.as_bool()).unwrap_or(default)
}

/// Reads a list of SteamID64s given as a JSON array or a comma-separated string.
/// Duplicates are removed, first occurrence wins.
pub fn steam_id_list(args: &Value, field: &str, max: usize) -> Result<Vec<SteamId>, ToolSourceError> {
    let raw: Vec<String> = match args.get(field) {
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| match v {
                Value::String(s) => Ok(s.clone()),
                Value::Number(n) => Ok(n.to_string()),
                _ => Err(ToolSourceError::InvalidInput(format!(
                    "'{}' must contain strings",
                    field
                ))),
            })
            .collect::<Result<_, _>>()?,
        Some(Value::String(s)) => s.split(',').map(|p| p.to_string()).collect(),
        _ => return Err(ToolSourceError::InvalidInput(format!("missing '{}'", field))),
    };

    let mut out: Vec<SteamId> = Vec::new();
    for item in raw.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
        let id = parse_steam_id(item)?;
        if !out.contains(&id) {
            out.push(id);
        }
    }
    if out.is_empty() {
        return Err(ToolSourceError::InvalidInput(format!("'{}' is empty", field)));
    }
    if out.len() > max {
        return Err(ToolSourceError::InvalidInput(format!(
            "'{}' accepts at most {} ids, got {}",
            field,
            max,
            out.len()
        )));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn player_ref_kinds() {
        assert_eq!(
            parse_player_ref("76561197960287930").unwrap(),
            PlayerRef::Id(SteamId::new(76561197960287930))
        );
        assert_eq!(
            parse_player_ref(" gabelogannewell ").unwrap(),
            PlayerRef::Vanity("gabelogannewell".to_string())
        );
        assert!(parse_player_ref("a").is_err());
        assert!(parse_player_ref("has spaces").is_err());
        // 17 digits but wrong prefix is treated as a vanity-looking token, not an id.
        assert!(parse_steam_id("12345678901234567").is_err());
    }

    #[test]
    fn appid_accepts_number_or_string() {
        assert_eq!(require_appid(&json!({"appid": 440}), "appid").unwrap(), 440);
        assert_eq!(require_appid(&json!({"appid": "570"}), "appid").unwrap(), 570);
        assert!(require_appid(&json!({"appid": 0}), "appid").is_err());
        assert!(require_appid(&json!({"appid": -3}), "appid").is_err());
        assert!(require_appid(&json!({"appid": 5_000_000_000u64}), "appid").is_err());
        assert!(require_appid(&json!({}), "appid").is_err());
    }

    #[test]
    fn bounded_values_clamp() {
        assert_eq!(bounded_u32(&json!({}), "count", 10, 1, 50), 10);
        assert_eq!(bounded_u32(&json!({"count": 0}), "count", 10, 1, 50), 1);
        assert_eq!(bounded_u32(&json!({"count": 5000}), "count", 10, 1, 50), 50);
    }

    #[test]
    fn id_list_dedupes_and_limits() {
        let ids = steam_id_list(
            &json!({"steamids": ["76561197960287930", "76561197960287930", "76561197960265729"]}),
            "steamids",
            100,
        )
        .unwrap();
        assert_eq!(ids.len(), 2);

        let csv = steam_id_list(
            &json!({"steamids": "76561197960287930, 76561197960265729"}),
            "steamids",
            100,
        )
        .unwrap();
        assert_eq!(csv, ids);

        assert!(steam_id_list(&json!({"steamids": []}), "steamids", 100).is_err());
        assert!(steam_id_list(
            &json!({"steamids": ["76561197960287930", "76561197960265729"]}),
            "steamids",
            1
        )
        .is_err());
    }
}
