//! Endpoint paths of the control API
//!
//! Query strings are encoded deterministically: booleans as the literal
//! `true`/`false`, and optional parameters omitted entirely when absent.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use simcon_core::EventType;

pub const HEALTH: &str = "/api/health";
pub const STATUS: &str = "/api/status";
pub const STATE: &str = "/api/state";
pub const METRICS: &str = "/api/metrics";
pub const CONFIG: &str = "/api/config";
pub const CONTROL_START: &str = "/api/control/start";
pub const CONTROL_STOP: &str = "/api/control/stop";

/// Characters left untouched in query values (RFC 3986 unreserved set)
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

pub fn reset_path(clear_data: bool) -> String {
    format!("/api/control/reset?clear_data={clear_data}")
}

pub fn activity_path(limit: u32, offset: u32, event_type: Option<&EventType>) -> String {
    let mut path = format!("/api/activity?limit={limit}&offset={offset}");
    if let Some(event_type) = event_type.filter(|t| !t.as_str().is_empty()) {
        path.push_str("&event_type=");
        path.extend(utf8_percent_encode(event_type.as_str(), QUERY_VALUE));
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_path_serializes_literal_booleans() {
        assert_eq!(reset_path(true), "/api/control/reset?clear_data=true");
        assert_eq!(reset_path(false), "/api/control/reset?clear_data=false");
    }

    #[test]
    fn test_activity_path_omits_absent_event_type() {
        assert_eq!(
            activity_path(50, 0, None),
            "/api/activity?limit=50&offset=0"
        );
    }

    #[test]
    fn test_activity_path_with_event_type() {
        assert_eq!(
            activity_path(50, 100, Some(&EventType::GapFill)),
            "/api/activity?limit=50&offset=100&event_type=gap_fill"
        );
    }

    #[test]
    fn test_activity_path_omits_empty_event_type() {
        let empty = EventType::Other(String::new());
        assert_eq!(
            activity_path(10, 0, Some(&empty)),
            "/api/activity?limit=10&offset=0"
        );
    }

    #[test]
    fn test_activity_path_encodes_unusual_event_type() {
        let odd = EventType::Other("a b&c".to_string());
        assert_eq!(
            activity_path(1, 0, Some(&odd)),
            "/api/activity?limit=1&offset=0&event_type=a%20b%26c"
        );
    }
}
