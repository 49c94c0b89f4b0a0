use std::process::Command;

fn run_steam_mcp(args: &[&str], api_key: Option<&str>) -> std::process::Output {
    let env_dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_steam-mcp"));
    cmd.args(args)
        .arg("--env-dir")
        .arg(env_dir.path())
        .env_remove("LOG_FILE")
        .env("RUST_LOG", "error")
        // Unroutable base so nothing reaches the real API.
        .env("STEAM_API_BASE_URL", "http://127.0.0.1:9");
    match api_key {
        Some(k) => cmd.env("STEAM_API_KEY", k),
        None => cmd.env_remove("STEAM_API_KEY"),
    };
    cmd.output().expect("failed to run steam-mcp binary")
}

#[test]
fn cli_help_succeeds() {
    let out = run_steam_mcp(&["--help"], None);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Steam"));
    assert!(stdout.contains("tool"));
}

#[test]
fn tool_list_json_without_key_succeeds() {
    let out = run_steam_mcp(&["tool", "list", "--json"], None);
    assert!(out.status.success());
    let tools: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let tools = tools.as_array().unwrap();
    assert_eq!(tools.len(), 19);
    assert!(tools.iter().all(|t| t["inputSchema"]["type"] == "object"));
}

#[test]
fn tool_show_existing_prints_schema() {
    let out = run_steam_mcp(&["tool", "show", "get_owned_games"], None);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("\"get_owned_games\""));
    assert!(stdout.contains("inputSchema"));
}

#[test]
fn tool_show_missing_fails() {
    let out = run_steam_mcp(&["tool", "show", "no_such_tool"], None);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("tool not found"));
}

#[test]
fn tool_call_requires_key() {
    let out = run_steam_mcp(&["tool", "call", "get_current_players", "--args", r#"{"appid":440}"#], None);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("STEAM_API_KEY"));
}

#[test]
fn tool_call_rejects_bad_input_before_any_request() {
    let out = run_steam_mcp(
        &["tool", "call", "get_owned_games", "--args", r#"{"steamid":"not a player!"}"#],
        Some("test-key"),
    );
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("invalid input"));
    assert!(!stderr.contains("test-key"));
}

#[test]
fn tool_call_rejects_non_object_args() {
    let out = run_steam_mcp(&["tool", "call", "get_owned_games", "--args", "[1,2]"], Some("k"));
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("--args"));
}
