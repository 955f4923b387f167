//! Display formatting for dashboard and activity values

use chrono::{DateTime, Local, Utc};
use serde_json::Value;

/// Placeholder for a value the server reported as null
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder for a timestamp that was never set
pub const NEVER: &str = "Never";

/// `3725.0` -> `"1h 2m"`
pub fn uptime(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };
    format!("{}h {}m", total / 3600, (total % 3600) / 60)
}

/// Uptime, or N/A when the server reports none
pub fn optional_uptime(seconds: f64) -> String {
    if seconds > 0.0 {
        uptime(seconds)
    } else {
        NOT_AVAILABLE.to_string()
    }
}

/// Integer with thousands separators: `1234567` -> `"1,234,567"`
pub fn number(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn optional_number(value: Option<u64>) -> String {
    value.map(number).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// `Some(33.46)` -> `"33.5 pts/min"`
pub fn rate_per_min(value: Option<f64>) -> String {
    match value {
        Some(rate) => format!("{:.1} pts/min", rate),
        None => NOT_AVAILABLE.to_string(),
    }
}

pub fn duration_ms(value: Option<f64>) -> String {
    match value {
        Some(ms) if ms >= 1000.0 => format!("{:.1} s", ms / 1000.0),
        Some(ms) => format!("{:.0} ms", ms),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Full date and time, or "Never"
pub fn date_time(value: Option<&DateTime<Utc>>, utc: bool) -> String {
    match value {
        None => NEVER.to_string(),
        Some(ts) if utc => ts.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        Some(ts) => ts.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string(),
    }
}

/// Compact event timestamp: `"May 1, 12:00:05"`
pub fn event_time(value: &DateTime<Utc>, utc: bool) -> String {
    if utc {
        value.format("%b %-d, %H:%M:%S").to_string()
    } else {
        value.with_timezone(&Local).format("%b %-d, %H:%M:%S").to_string()
    }
}

/// Pretty JSON for a details pane
pub fn details(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_uptime() {
        assert_eq!(uptime(0.0), "0h 0m");
        assert_eq!(uptime(59.9), "0h 0m");
        assert_eq!(uptime(3725.0), "1h 2m");
        assert_eq!(uptime(90061.0), "25h 1m");
        assert_eq!(uptime(f64::NAN), "0h 0m");
    }

    #[test]
    fn test_optional_uptime() {
        assert_eq!(optional_uptime(0.0), "N/A");
        assert_eq!(optional_uptime(120.0), "0h 2m");
    }

    #[test]
    fn test_number_grouping() {
        assert_eq!(number(0), "0");
        assert_eq!(number(999), "999");
        assert_eq!(number(1000), "1,000");
        assert_eq!(number(1234567), "1,234,567");
        assert_eq!(optional_number(None), "N/A");
    }

    #[test]
    fn test_rate_and_duration() {
        assert_eq!(rate_per_min(Some(33.46)), "33.5 pts/min");
        assert_eq!(rate_per_min(None), "N/A");
        assert_eq!(duration_ms(Some(250.0)), "250 ms");
        assert_eq!(duration_ms(Some(1500.0)), "1.5 s");
        assert_eq!(duration_ms(None), "N/A");
    }

    #[test]
    fn test_date_time() {
        assert_eq!(date_time(None, true), "Never");
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 5).unwrap();
        assert_eq!(date_time(Some(&ts), true), "2024-05-01 12:00:05 UTC");
        assert_eq!(event_time(&ts, true), "May 1, 12:00:05");
    }

    #[test]
    fn test_details_pretty() {
        assert_eq!(details(&json!({"a": 1})), "{\n  \"a\": 1\n}");
    }
}
