//! Configuration types
//!
//! Defines `Settings` and its sections. Every field has a default so a
//! partial file is always valid.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Application settings (config.toml)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub polling: PollingSettings,

    #[serde(default)]
    pub activity: ActivitySettings,

    #[serde(default)]
    pub ui: UiSettings,
}

/// Control API connection settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ApiSettings {
    /// Base URL of the control API (overridden by `--url` / `SIMCON_API_URL`)
    #[serde(default)]
    pub base_url: Option<String>,

    /// Timeout for read requests in ms (0 = no timeout). Mutations are
    /// bounded by `action_timeout_ms` instead.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Upper bound for a mutating action (start/stop/reset/save) in ms
    #[serde(default = "default_action_timeout_ms")]
    pub action_timeout_ms: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            request_timeout_ms: default_request_timeout_ms(),
            action_timeout_ms: default_action_timeout_ms(),
        }
    }
}

impl ApiSettings {
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_ms > 0).then(|| Duration::from_millis(self.request_timeout_ms))
    }

    pub fn action_timeout(&self) -> Duration {
        Duration::from_millis(self.action_timeout_ms.max(MIN_ACTION_TIMEOUT_MS))
    }
}

/// Minimum action timeout, so a typo cannot make every action time out.
pub const MIN_ACTION_TIMEOUT_MS: u64 = 1000;

/// Minimum poll interval
pub const MIN_POLL_INTERVAL_MS: u64 = 500;

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_action_timeout_ms() -> u64 {
    15_000
}

/// Dashboard polling settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PollingSettings {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Consecutive failures before the interval starts doubling (0 = never)
    #[serde(default)]
    pub backoff_after_failures: u32,

    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,

    /// Consecutive failures before connectivity is shown as degraded
    /// (0 = never)
    #[serde(default = "default_degraded_after_failures")]
    pub degraded_after_failures: u32,
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            backoff_after_failures: 0,
            max_backoff_ms: default_max_backoff_ms(),
            degraded_after_failures: default_degraded_after_failures(),
        }
    }
}

fn default_interval_ms() -> u64 {
    5_000
}

fn default_max_backoff_ms() -> u64 {
    60_000
}

fn default_degraded_after_failures() -> u32 {
    3
}

/// Activity log settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ActivitySettings {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for ActivitySettings {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

fn default_page_size() -> u32 {
    crate::paginator::DEFAULT_PAGE_SIZE
}

/// UI settings
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct UiSettings {
    /// Show timestamps in UTC instead of local time
    #[serde(default)]
    pub show_timestamps_utc: bool,
}
