use chrono::{DateTime, Local, TimeZone};

/// `YYYY-MM-DD HH:MM` in local time: a trimmed-down ISO 8601 without
/// seconds or offset.
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String {
    date.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}
