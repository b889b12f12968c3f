//! Time utilities: RFC 3339 persistence helpers, duration formatting.
//!
//! Timestamps are stored as true UTC instants and converted to the local
//! zone only at presentation time, so duration math never sees an offset.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Local, Utc};

/// Current instant, UTC.
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Serialize an instant for the DB (RFC 3339, UTC).
pub fn to_db_str(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339()
}

/// Parse an instant coming back from the DB.
pub fn from_db_str(s: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| AppError::InvalidTimestamp(s.to_string()))
}

/// Local-zone rendering for status lines, history and notifications.
pub fn format_local(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

pub fn format_minutes(mins: i64) -> String {
    let sign = if mins < 0 { "-" } else { "" };
    let m = mins.abs();
    format!("{}{:02}:{:02}", sign, m / 60, m % 60)
}

/// Compact duration label, e.g. 90 → "1h30m".
pub fn format_duration_label(mins: i64) -> String {
    let m = mins.max(0);
    format!("{}h{:02}m", m / 60, m % 60)
}
