//! Settings loading and base URL resolution

use std::path::{Path, PathBuf};

use simcon_client::DEFAULT_BASE_URL;
use simcon_core::{Error, Result};
use tracing::{debug, warn};

use super::types::Settings;

/// Environment variable overriding the control API base URL
pub const API_URL_ENV: &str = "SIMCON_API_URL";

const CONFIG_DIR: &str = "simcon";
const CONFIG_FILENAME: &str = "config.toml";

/// `<config_dir>/simcon/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILENAME))
}

/// Load settings from `config_path`.
///
/// A missing file yields defaults; an unreadable or invalid file is logged
/// and also yields defaults.
pub fn load_settings(config_path: &Path) -> Settings {
    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match read_settings(config_path) {
        Ok(settings) => {
            debug!("Loaded settings from {:?}", config_path);
            settings
        }
        Err(e) => {
            warn!("{}; using defaults", e);
            Settings::default()
        }
    }
}

/// Strictly read and parse a settings file.
pub fn read_settings(config_path: &Path) -> Result<Settings> {
    let content = std::fs::read_to_string(config_path)?;
    toml::from_str(&content)
        .map_err(|e| Error::config(format!("invalid {}: {}", config_path.display(), e)))
}

/// Pick the base URL: CLI flag, then `SIMCON_API_URL`, then the settings
/// file, then the default. Blank values are skipped.
pub fn resolve_base_url(flag: Option<&str>, settings: &Settings) -> String {
    let env = std::env::var(API_URL_ENV).ok();
    let url = [flag, env.as_deref(), settings.api.base_url.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|url| !url.is_empty())
        .unwrap_or(DEFAULT_BASE_URL)
        .to_string();
    url
}
