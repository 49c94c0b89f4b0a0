//! MCP stdio protocol end to end over in-memory pipes, with Steam mocked below the gateway.

mod common;
mod init_logging;

use std::sync::Arc;

use common::{RoutedHttpClient, API_KEY};
use serde_json::{json, Value};
use steam_mcp::McpServer;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

const CURRENT_PLAYERS: &str = "ISteamUserStats/GetNumberOfCurrentPlayers/v1/";

/// Writes `requests` as lines, closes the input, and returns every response line.
async fn session(http: Arc<RoutedHttpClient>, requests: &[Value]) -> Vec<Value> {
    let server = McpServer::new(Arc::new(common::registry(http)))
        .with_server_info("steam-mcp", "test")
        .with_secret(API_KEY);

    let (mut client_in, server_in) = tokio::io::duplex(1 << 20);
    let (server_out, client_out) = tokio::io::duplex(1 << 20);

    let mut input = String::new();
    for r in requests {
        input.push_str(&r.to_string());
        input.push('\n');
    }
    client_in.write_all(input.as_bytes()).await.unwrap();
    drop(client_in);

    server.serve(BufReader::new(server_in), server_out).await.unwrap();

    let mut lines = BufReader::new(client_out).lines();
    let mut out = Vec::new();
    while let Some(line) = lines.next_line().await.unwrap() {
        out.push(serde_json::from_str(&line).unwrap());
    }
    out
}

fn call(id: u64, name: &str, arguments: Value) -> Value {
    json!({
        "jsonrpc": "2.0", "id": id, "method": "tools/call",
        "params": { "name": name, "arguments": arguments }
    })
}

/// **Scenario**: a client handshake, list and successful call.
#[tokio::test]
async fn handshake_list_and_call() {
    let http = Arc::new(RoutedHttpClient::new().json(
        CURRENT_PLAYERS,
        json!({ "response": { "player_count": 51234, "result": 1 } }),
    ));
    let responses = session(
        http.clone(),
        &[
            json!({ "jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {
                "protocolVersion": "2024-11-05", "capabilities": {},
                "clientInfo": { "name": "test", "version": "0" }
            } }),
            json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }),
            json!({ "jsonrpc": "2.0", "id": 2, "method": "tools/list" }),
            call(3, "get_current_players", json!({ "appid": 730 })),
        ],
    )
    .await;

    assert_eq!(responses.len(), 3);
    assert_eq!(responses[0]["id"], 1);
    assert_eq!(responses[0]["result"]["serverInfo"]["name"], "steam-mcp");
    assert_eq!(responses[0]["result"]["protocolVersion"], "2024-11-05");

    let tools = responses[1]["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 19);
    assert!(tools.iter().all(|t| t["inputSchema"]["type"] == "object"));

    let result = &responses[2]["result"];
    assert_eq!(result["isError"], false);
    let body: Value = serde_json::from_str(result["content"][0]["text"].as_str().unwrap()).unwrap();
    assert_eq!(body, json!({ "appid": 730, "player_count": 51234 }));
    assert_eq!(http.calls_to(CURRENT_PLAYERS)[0]["appid"], "730");
}

/// **Scenario**: remote failures are tool errors, not protocol errors, and never leak the key.
#[tokio::test]
async fn remote_failures_are_error_results() {
    let http = Arc::new(
        RoutedHttpClient::new()
            .status(CURRENT_PLAYERS, 429, json!("Too Many Requests"))
            .status(
                "IPlayerService/GetSteamLevel/v1/",
                403,
                json!(format!("Access denied for key={}", API_KEY)),
            ),
    );
    let responses = session(
        http,
        &[
            call(1, "get_current_players", json!({ "appid": 730 })),
            call(2, "get_steam_level", json!({ "steamid": common::PLAYER })),
            call(3, "get_current_players", json!({ "appid": "abc" })),
            call(4, "no_such_tool", json!({})),
        ],
    )
    .await;

    assert_eq!(responses.len(), 4);

    let limited = &responses[0]["result"];
    assert_eq!(limited["isError"], true);
    assert!(limited["content"][0]["text"].as_str().unwrap().contains("rate limited"));

    let denied = responses[1]["result"]["content"][0]["text"].as_str().unwrap();
    assert_eq!(responses[1]["result"]["isError"], true);
    assert!(!denied.contains(API_KEY), "{}", denied);
    assert!(denied.contains("***"), "{}", denied);

    assert_eq!(responses[2]["result"]["isError"], true);

    assert_eq!(responses[3]["error"]["code"], -32602);
    assert!(responses[3].get("result").is_none());
}
