//! Display helpers for counts, ages and sizes.

use chrono::{DateTime, Utc};

const MINUTE_MS: i64 = 60 * 1000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

/// `999`, `1.5K`, `2.0M`. One decimal, halves round up.
pub fn format_views(views: u64) -> String {
    if views >= 1_000_000 {
        let tenths = views.saturating_add(50_000) / 100_000;
        format!("{}.{}M", tenths / 10, tenths % 10)
    } else if views >= 1_000 {
        let tenths = views.saturating_add(50) / 100;
        format!("{}.{}K", tenths / 10, tenths % 10)
    } else {
        views.to_string()
    }
}

fn elapsed_ms(created_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - created_at).num_milliseconds().abs()
}

fn days_or_months(days: i64) -> String {
    if days == 1 {
        return "1 day ago".to_string();
    }
    if days < 30 {
        return format!("{} days ago", days);
    }
    match days / 30 {
        1 => "1 month ago".to_string(),
        months => format!("{} months ago", months),
    }
}

/// Age on a feed card. Partial days count as a whole day.
pub fn format_card_age(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let ms = elapsed_ms(created_at, now);
    let days = (ms + DAY_MS - 1) / DAY_MS;
    days_or_months(days)
}

/// Age of a comment: minutes, then hours, then days.
pub fn format_comment_age(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let ms = elapsed_ms(created_at, now);
    let minutes = ms / MINUTE_MS;
    let hours = ms / HOUR_MS;

    if minutes < 60 {
        format!("{}m ago", minutes)
    } else if hours < 24 {
        format!("{}h ago", hours)
    } else {
        days_or_months(ms / DAY_MS)
    }
}

/// Binary units with at most two decimals: `0 Bytes`, `1.5 KB`, `2 MB`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut scale = 1u64;
    while unit + 1 < UNITS.len() && bytes >= scale * 1024 {
        scale *= 1024;
        unit += 1;
    }

    let value = (bytes as f64 / scale as f64 * 100.0).round() / 100.0;
    format!("{} {}", value, UNITS[unit])
}
