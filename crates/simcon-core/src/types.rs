//! Status, metrics and control payloads of the simulator control API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Run state reported by the simulator.
///
/// Any status string the console does not recognize maps to `Unknown`
/// instead of failing the whole payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum RunStatus {
    Running,
    Stopped,
    Error,
    #[default]
    Unknown,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Running => "running",
            RunStatus::Stopped => "stopped",
            RunStatus::Error => "error",
            RunStatus::Unknown => "unknown",
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, RunStatus::Running)
    }
}

impl From<String> for RunStatus {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "running" => RunStatus::Running,
            "stopped" => RunStatus::Stopped,
            "error" => RunStatus::Error,
            _ => RunStatus::Unknown,
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `GET /api/health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    pub uptime_seconds: f64,
    #[serde(default)]
    pub version: String,
}

/// `GET /api/status`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SimulatorStatus {
    pub status: RunStatus,
    #[serde(default, with = "crate::timestamp::option")]
    pub last_run: Option<DateTime<Utc>>,
    #[serde(default)]
    pub points_generated_total: Option<u64>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// `GET /api/metrics`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Metrics {
    pub total_points_generated: u64,
    pub total_entities: u64,
    #[serde(default)]
    pub generation_rate_per_min: Option<f64>,
    #[serde(default)]
    pub last_interval_duration_ms: Option<f64>,
    pub error_count_24h: u64,
    pub uptime_seconds: f64,
}

/// `GET /api/state` - full persisted simulator state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatorState {
    pub status: RunStatus,
    #[serde(default, with = "crate::timestamp::option")]
    pub last_run_timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub totalizers: Option<Value>,
    #[serde(default)]
    pub config: Option<Value>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default, with = "crate::timestamp::option")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Acknowledgment returned by control and config-update endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlResponse {
    pub message: String,
    pub status: String,
}
