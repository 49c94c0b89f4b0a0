//! Key/value sources: project `.env` and the `[env]` table of the XDG `config.toml`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::LoadError;

/// `$XDG_CONFIG_HOME/<app>/config.toml`, falling back to the platform config dir.
pub(crate) fn xdg_config_file(app_name: &str) -> Result<PathBuf, LoadError> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
        .ok_or_else(|| LoadError::XdgPath("no config directory for this platform".into()))?;
    Ok(base.join(app_name).join("config.toml"))
}

#[derive(serde::Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    env: HashMap<String, String>,
}

/// `[env]` table of `path`. A missing file is an empty map.
pub(crate) fn toml_env_map(path: &Path) -> Result<HashMap<String, String>, LoadError> {
    if !path.is_file() {
        return Ok(HashMap::new());
    }
    let content = std::fs::read_to_string(path).map_err(LoadError::XdgRead)?;
    let config: ConfigFile = toml::from_str(&content)?;
    Ok(config.env)
}

/// Entries of `<dir>/.env`. A missing file is an empty map.
pub(crate) fn dotenv_map(dir: &Path) -> Result<HashMap<String, String>, LoadError> {
    let path = dir.join(".env");
    if !path.is_file() {
        return Ok(HashMap::new());
    }
    let iter = dotenv::from_path_iter(&path).map_err(|e| LoadError::Dotenv(e.to_string()))?;
    iter.map(|item| item.map_err(|e| LoadError::Dotenv(e.to_string())))
        .collect()
}

/// Merges the sources for keys absent from `is_set`: `.env` first, then XDG.
pub(crate) fn merge_missing(
    dotenv: HashMap<String, String>,
    xdg: HashMap<String, String>,
    is_set: impl Fn(&str) -> bool,
) -> Vec<(String, String)> {
    let mut merged = xdg;
    merged.extend(dotenv);
    let mut out: Vec<(String, String)> = merged.into_iter().filter(|(k, _)| !is_set(k)).collect();
    out.sort();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_env_table_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[env]\nSTEAM_API_KEY = \"abc\"\n[other]\nx = 1\n").unwrap();
        let map = toml_env_map(&path).unwrap();
        assert_eq!(map.get("STEAM_API_KEY").map(String::as_str), Some("abc"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn missing_files_are_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(toml_env_map(&dir.path().join("config.toml")).unwrap().is_empty());
        assert!(dotenv_map(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn bad_toml_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "invalid [[[\n").unwrap();
        assert!(matches!(toml_env_map(&path), Err(LoadError::XdgParse(_))));
    }

    #[test]
    fn dotenv_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".env"),
            "# comment\nSTEAM_FANOUT_CONCURRENCY=4\nQUOTED=\"a b\"\n",
        )
        .unwrap();
        let map = dotenv_map(dir.path()).unwrap();
        assert_eq!(map.get("STEAM_FANOUT_CONCURRENCY").map(String::as_str), Some("4"));
        assert_eq!(map.get("QUOTED").map(String::as_str), Some("a b"));
    }

    #[test]
    fn dotenv_beats_xdg_and_env_beats_both() {
        let dotenv = HashMap::from([
            ("A".to_string(), "dotenv".to_string()),
            ("B".to_string(), "dotenv".to_string()),
        ]);
        let xdg = HashMap::from([
            ("A".to_string(), "xdg".to_string()),
            ("C".to_string(), "xdg".to_string()),
            ("D".to_string(), "xdg".to_string()),
        ]);
        let out = merge_missing(dotenv, xdg, |k| k == "D");
        assert_eq!(
            out,
            vec![
                ("A".to_string(), "dotenv".to_string()),
                ("B".to_string(), "dotenv".to_string()),
                ("C".to_string(), "xdg".to_string()),
            ]
        );
    }
}
