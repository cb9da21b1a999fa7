//! Wall-clock helpers shared by cookie expiry and timer hosts.

use chrono::DateTime;
#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

const MS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

/// Returns the current unix timestamp in milliseconds.
pub fn unix_time_ms_now() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now().max(0.0) as u64
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// Renders a unix millisecond timestamp as an HTTP date (`Thu, 01 Jan 1970 00:00:00 GMT`).
///
/// Out-of-range timestamps render as the unix epoch.
pub fn http_date(unix_ms: i64) -> String {
    DateTime::from_timestamp_millis(unix_ms)
        .unwrap_or_default()
        .format("%a, %d %b %Y %H:%M:%S GMT")
        .to_string()
}

/// Parses an HTTP date back into unix milliseconds.
pub fn parse_http_date(raw: &str) -> Option<i64> {
    DateTime::parse_from_rfc2822(raw.trim())
        .ok()
        .map(|date| date.timestamp_millis())
}

/// Returns the unix millisecond timestamp `days` after `now_ms`.
pub fn days_after(now_ms: u64, days: f64) -> i64 {
    (now_ms as f64 + days * MS_PER_DAY).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_date_renders_gmt_form() {
        assert_eq!(http_date(0), "Thu, 01 Jan 1970 00:00:00 GMT");
        assert_eq!(http_date(86_400_000), "Fri, 02 Jan 1970 00:00:00 GMT");
    }

    #[test]
    fn http_date_parses_back() {
        let rendered = http_date(1_700_000_000_000);
        assert_eq!(parse_http_date(&rendered), Some(1_700_000_000_000));
        assert_eq!(parse_http_date("not a date"), None);
    }

    #[test]
    fn days_after_scales_by_whole_days() {
        assert_eq!(days_after(0, 1.0), 86_400_000);
        assert_eq!(days_after(1_000, 0.5), 43_201_000);
    }
}
