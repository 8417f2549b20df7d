//! Time utilities: flight durations in decimal hours and their formatting.

use chrono::{NaiveTime, Timelike};

/// Parse a logged duration into decimal hours.
///
/// - `"1:30"` → `1.5` (hours:minutes)
/// - `"2"` / `"2.25"` → plain decimal hours
/// - anything else → `None`
pub fn parse_duration_hours(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if s.contains(':') {
        // seconds, when present, are ignored: "1:30:00" → 1.5
        let mut parts = s.split(':');
        let hours: u32 = parts.next()?.trim().parse().ok()?;
        let minutes: u32 = parts.next()?.trim().parse().ok()?;
        return Some(hours as f64 + minutes as f64 / 60.0);
    }

    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Time of day read as an elapsed duration (Excel "h:mm" cells).
pub fn time_to_hours(t: &NaiveTime) -> f64 {
    t.hour() as f64 + t.minute() as f64 / 60.0 + t.second() as f64 / 3600.0
}

/// Decimal hours → `HH:MM`.
pub fn format_hours(hours: f64) -> String {
    let total = (hours * 60.0).round() as i64;
    let sign = if total < 0 { "-" } else { "" };
    let m = total.abs();
    format!("{}{:02}:{:02}", sign, m / 60, m % 60)
}
