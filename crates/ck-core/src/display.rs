use std::fmt;

use chrono::{Local, TimeZone};

use crate::codec::format_datetime;

const MINUTE_MS: i64 = 60_000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

/// Label shown next to an entry, relative or absolute per `showRelativeTime`.
pub fn display_time(timestamp_ms: i64, now_ms: i64, relative: bool) -> String {
    display_time_in(timestamp_ms, now_ms, relative, &Local)
}

pub fn display_time_in<Tz>(timestamp_ms: i64, now_ms: i64, relative: bool, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    if !relative {
        return format_datetime(timestamp_ms, tz);
    }

    let elapsed = now_ms.saturating_sub(timestamp_ms).max(0);
    match elapsed {
        e if e < MINUTE_MS => "just now".to_string(),
        e if e < HOUR_MS => format!("{}m ago", e / MINUTE_MS),
        e if e < DAY_MS => format!("{}h ago", e / HOUR_MS),
        e if e < 7 * DAY_MS => format!("{}d ago", e / DAY_MS),
        _ => format_datetime(timestamp_ms, tz),
    }
}
