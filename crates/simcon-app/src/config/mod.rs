//! Configuration file parsing for the simulator console
//!
//! Supports `<config_dir>/simcon/config.toml` (or an explicit path) with
//! CLI and environment overrides for the API base URL.

pub mod settings;
pub mod types;

pub use settings::{
    default_config_path, load_settings, read_settings, resolve_base_url, API_URL_ENV,
};
pub use types::*;
