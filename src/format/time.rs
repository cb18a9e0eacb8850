//! Duration and timestamp formatting

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};

use super::Locale;

const MINUTE_MS: i64 = 60_000;
const HOUR_MS: i64 = 3_600_000;
const DAY_MS: i64 = 86_400_000;

/// Format a processing time given in milliseconds.
///
/// Missing or zero → the zero token, under one second → raw milliseconds,
/// otherwise seconds with one decimal place.
pub fn format_duration(ms: Option<u64>, locale: Locale) -> String {
    match ms.unwrap_or(0) {
        0 => locale.zero_duration().to_string(),
        n if n < 1000 => format!("{}ms", n),
        n => locale.seconds(n as f64 / 1000.0),
    }
}

/// Parse a server timestamp.
///
/// RFC 3339 strings carry their own offset. Offset-less timestamps (the
/// backend's `LocalDateTime`) are read as wall-clock time in `offset`.
pub fn parse_timestamp(raw: &str, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .and_then(|naive| offset.from_local_datetime(&naive).single())
}

/// Format a timestamp relative to `now`.
///
/// Under a minute → "just now", under an hour → whole minutes, under a day →
/// whole hours, otherwise the absolute date and time in `now`'s offset.
/// Missing input renders empty; unparseable input is shown as-is.
pub fn format_relative(raw: Option<&str>, now: DateTime<FixedOffset>, locale: Locale) -> String {
    let raw = match raw {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => return String::new(),
    };

    let Some(timestamp) = parse_timestamp(raw, *now.offset()) else {
        return raw.to_string();
    };

    let diff = (now - timestamp).num_milliseconds();
    if diff < MINUTE_MS {
        locale.just_now().to_string()
    } else if diff < HOUR_MS {
        locale.minutes_ago(diff / MINUTE_MS)
    } else if diff < DAY_MS {
        locale.hours_ago(diff / HOUR_MS)
    } else {
        locale.absolute_datetime(&timestamp.with_timezone(now.offset()))
    }
}
