//! Activity log types
//!
//! The activity log is append-only from the console's point of view: events
//! are only ever accumulated page by page, never mutated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Category of an activity event.
///
/// The server is free to introduce new categories; those deserialize into
/// [`EventType::Other`] so a single unfamiliar event never fails a page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    Generation,
    GapFill,
    Start,
    Stop,
    Error,
    ConfigChange,
    Reset,
    Other(String),
}

impl EventType {
    /// The categories offered as activity filters, in display order.
    pub const FILTERABLE: [EventType; 7] = [
        EventType::Generation,
        EventType::GapFill,
        EventType::Start,
        EventType::Stop,
        EventType::Error,
        EventType::ConfigChange,
        EventType::Reset,
    ];

    /// Wire name, as sent in the `event_type` query parameter.
    pub fn as_str(&self) -> &str {
        match self {
            EventType::Generation => "generation",
            EventType::GapFill => "gap_fill",
            EventType::Start => "start",
            EventType::Stop => "stop",
            EventType::Error => "error",
            EventType::ConfigChange => "config_change",
            EventType::Reset => "reset",
            EventType::Other(raw) => raw,
        }
    }

    /// Human-readable label (`gap_fill` -> `gap fill`)
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

impl From<String> for EventType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "generation" => EventType::Generation,
            "gap_fill" => EventType::GapFill,
            "start" => EventType::Start,
            "stop" => EventType::Stop,
            "error" => EventType::Error,
            "config_change" => EventType::ConfigChange,
            "reset" => EventType::Reset,
            _ => EventType::Other(raw),
        }
    }
}

impl From<EventType> for String {
    fn from(event_type: EventType) -> Self {
        event_type.as_str().to_string()
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single entry of the activity log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEvent {
    /// Unique, monotonically increasing id
    pub id: i64,
    #[serde(with = "crate::timestamp")]
    pub timestamp: DateTime<Utc>,
    pub event_type: EventType,
    pub message: String,
    #[serde(default)]
    pub details: Option<Value>,
}

impl ActivityEvent {
    /// Whether the event carries a non-empty `details` object
    pub fn has_details(&self) -> bool {
        match &self.details {
            Some(Value::Object(map)) => !map.is_empty(),
            Some(Value::Null) | None => false,
            Some(_) => true,
        }
    }
}

/// `GET /api/activity` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityPage {
    pub events: Vec<ActivityEvent>,
    pub limit: u32,
    pub offset: u32,
    pub count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_type_wire_names() {
        assert_eq!(EventType::GapFill.as_str(), "gap_fill");
        assert_eq!(EventType::ConfigChange.as_str(), "config_change");
        assert_eq!(EventType::from("reset".to_string()), EventType::Reset);
    }

    #[test]
    fn test_event_type_unknown_is_preserved() {
        let event_type = EventType::from("maintenance".to_string());
        assert_eq!(event_type, EventType::Other("maintenance".to_string()));
        assert_eq!(event_type.as_str(), "maintenance");
    }

    #[test]
    fn test_event_type_label() {
        assert_eq!(EventType::GapFill.label(), "gap fill");
        assert_eq!(EventType::Start.label(), "start");
    }

    #[test]
    fn test_activity_page_parses() {
        let page: ActivityPage = serde_json::from_value(json!({
            "events": [
                {
                    "id": 7,
                    "timestamp": "2024-05-01T12:00:00",
                    "event_type": "generation",
                    "message": "Generated 120 points",
                    "details": {"points": 120}
                },
                {
                    "id": 6,
                    "timestamp": "2024-05-01T11:45:00",
                    "event_type": "calibration",
                    "message": "Sensor calibration",
                    "details": null
                }
            ],
            "limit": 50,
            "offset": 0,
            "count": 2
        }))
        .unwrap();

        assert_eq!(page.count, 2);
        assert!(page.events[0].has_details());
        assert_eq!(
            page.events[1].event_type,
            EventType::Other("calibration".to_string())
        );
        assert!(!page.events[1].has_details());
    }

    #[test]
    fn test_empty_details_object_is_not_shown() {
        let event = ActivityEvent {
            id: 1,
            timestamp: Utc::now(),
            event_type: EventType::Stop,
            message: "stopped".into(),
            details: Some(json!({})),
        };
        assert!(!event.has_details());
    }
}
