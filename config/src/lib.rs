//! Configuration for steam-mcp.
//!
//! [`load_and_apply`] fills the process environment from XDG `config.toml` and the
//! project `.env` with priority **existing env > .env > XDG**; [`SteamConfig::from_env`]
//! then reads the typed settings.

mod sources;
mod steam;

use std::path::Path;

use thiserror::Error;

pub use steam::{
    ConfigError, SteamConfig, API_BASE_URL, API_KEY, APP_LIST_TTL_SECS, FANOUT_CONCURRENCY,
    HTTP_TIMEOUT_SECS, STORE_BASE_URL,
};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("xdg config path: {0}")]
    XdgPath(String),
    #[error("read xdg config: {0}")]
    XdgRead(std::io::Error),
    #[error("parse xdg toml: {0}")]
    XdgParse(#[from] toml::de::Error),
    #[error("read .env: {0}")]
    Dotenv(String),
}

/// Sets environment variables from `.env` and `$XDG_CONFIG_HOME/<app_name>/config.toml`
/// for keys that are not already set.
///
/// * `override_dir`: directory holding `.env`; defaults to the current directory.
///
/// Returns the keys that were set.
pub fn load_and_apply(app_name: &str, override_dir: Option<&Path>) -> Result<Vec<String>, LoadError> {
    let xdg = sources::toml_env_map(&sources::xdg_config_file(app_name)?)?;
    let dotenv = match override_dir {
        Some(dir) => sources::dotenv_map(dir)?,
        None => match std::env::current_dir() {
            Ok(dir) => sources::dotenv_map(&dir)?,
            Err(_) => Default::default(),
        },
    };

    let missing = sources::merge_missing(dotenv, xdg, |k| std::env::var_os(k).is_some());
    let mut applied = Vec::with_capacity(missing.len());
    for (key, value) in missing {
        std::env::set_var(&key, value);
        applied.push(key);
    }
    Ok(applied)
}
