use chrono::{Local, TimeZone};

use crate::duration::{MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND};

/// Breakdown of a non-negative millisecond magnitude into display units.
fn decompose(ms: i64) -> (i64, i64, i64, i64) {
    let days = ms / MS_PER_DAY;
    let hours = (ms / MS_PER_HOUR) % 24;
    let minutes = (ms / MS_PER_MINUTE) % 60;
    let seconds = (ms / MS_PER_SECOND) % 60;
    (days, hours, minutes, seconds)
}

fn unit(value: i64, singular: &str) -> String {
    if value == 1 {
        format!("{value} {singular}")
    } else {
        format!("{value} {singular}s")
    }
}

/// Zero-suppressed duration text for static results, e.g. "1 day 2 hours".
///
/// A zero magnitude renders "0 seconds", never an empty string.
pub fn format_compact(ms: i64) -> String {
    let (days, hours, minutes, seconds) = decompose(ms.max(0));

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(unit(days, "day"));
    }
    if hours > 0 {
        parts.push(unit(hours, "hour"));
    }
    if minutes > 0 {
        parts.push(unit(minutes, "minute"));
    }
    if seconds > 0 {
        parts.push(unit(seconds, "second"));
    }

    if parts.is_empty() {
        // Zero and sub-second magnitudes both land here.
        return "0 seconds".to_string();
    }

    parts.join(" ")
}

/// Constant-shape duration text for the live countdown: "{days}d HH:MM:SS".
/// All four groups are always present so the display never changes width
/// as units cross zero.
pub fn format_fixed(ms: i64) -> String {
    let (days, hours, minutes, seconds) = decompose(ms.max(0));
    format!("{days}d {hours:02}:{minutes:02}:{seconds:02}")
}

/// Local-calendar rendering of an epoch-ms instant, fixed 24-hour
/// `YYYY/MM/DD HH:mm:ss` format.
pub fn format_instant(ms: i64) -> String {
    match Local.timestamp_millis_opt(ms).earliest() {
        Some(dt) => dt.format("%Y/%m/%d %H:%M:%S").to_string(),
        None => "invalid time".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    #[test]
    fn compact_zero_is_zero_seconds() {
        assert_eq!(format_compact(0), "0 seconds");
    }

    #[test]
    fn compact_subsecond_magnitudes_are_never_empty() {
        // Every unit decomposes to zero below one second; the zero fallback
        // must cover that range, not just ms == 0.
        assert_eq!(format_compact(1), "0 seconds");
        assert_eq!(format_compact(500), "0 seconds");
        assert_eq!(format_compact(999), "0 seconds");
        assert_eq!(format_compact(MS_PER_SECOND), "1 second");
    }

    #[test]
    fn compact_skips_zero_units() {
        assert_eq!(format_compact(90_000), "1 minute 30 seconds");
        assert_eq!(format_compact(MS_PER_DAY), "1 day");
        assert_eq!(format_compact(MS_PER_HOUR + 5 * MS_PER_SECOND), "1 hour 5 seconds");
    }

    #[test]
    fn compact_pluralizes() {
        let ms = 2 * MS_PER_DAY + 2 * MS_PER_HOUR + 2 * MS_PER_MINUTE + 2 * MS_PER_SECOND;
        assert_eq!(format_compact(ms), "2 days 2 hours 2 minutes 2 seconds");
    }

    #[test]
    fn compact_full_breakdown() {
        let ms = MS_PER_DAY + 2 * MS_PER_HOUR + 3 * MS_PER_MINUTE + 4 * MS_PER_SECOND;
        assert_eq!(format_compact(ms), "1 day 2 hours 3 minutes 4 seconds");
    }

    #[test]
    fn fixed_always_shows_four_groups() {
        assert_eq!(format_fixed(0), "0d 00:00:00");
        assert_eq!(format_fixed(5_000), "0d 00:00:05");
        assert_eq!(format_fixed(MS_PER_DAY + 9 * MS_PER_MINUTE), "1d 00:09:00");
        assert_eq!(
            format_fixed(365 * MS_PER_DAY + 23 * MS_PER_HOUR + 59 * MS_PER_MINUTE + 59 * MS_PER_SECOND),
            "365d 23:59:59"
        );
    }

    #[test]
    fn instant_renders_local_calendar() {
        // Construct the instant from a local datetime so the assertion holds
        // in any timezone.
        let dt = Local.with_ymd_and_hms(2024, 1, 2, 2, 0, 0).unwrap();
        assert_eq!(format_instant(dt.timestamp_millis()), "2024/01/02 02:00:00");
    }
}
