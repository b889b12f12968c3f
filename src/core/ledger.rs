//! Append-only attendance ledger.
//!
//! Entries are created only by a transition into the lab and closed only by
//! a transition out of it; nothing here ever deletes a row. The invariant
//! "at most one open entry per profile" is enforced twice: a pre-check in
//! `open_entry` and, authoritatively, the partial unique index on
//! `attendance(profile_id) WHERE check_out IS NULL`.

use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::attendance::AttendanceEntry;
use crate::utils::time;
use rusqlite::Connection;

/// Open a new entry with `check_in = now`.
///
/// The caller (the state machine) is expected to have checked for an open
/// entry already; the re-validation here plus the unique index cover the
/// race where another writer slipped in between.
pub fn open_entry(
    conn: &Connection,
    profile_id: i64,
    comment: Option<&str>,
) -> AppResult<AttendanceEntry> {
    if queries::find_open_entry(conn, profile_id)?.is_some() {
        return Err(AppError::DuplicateOpenEntry(profile_id));
    }

    queries::insert_entry(conn, profile_id, time::now_utc(), comment)
}

/// Close the most recent open entry with `check_out = now`, keeping the
/// existing comment unless a new one is given.
pub fn close_most_recent_open_entry(
    conn: &Connection,
    profile_id: i64,
    comment: Option<&str>,
) -> AppResult<AttendanceEntry> {
    let open = queries::find_open_entry(conn, profile_id)?
        .ok_or(AppError::NoOpenEntry(profile_id))?;

    let check_out = time::now_utc();
    let changed = queries::close_entry(conn, open.id, check_out, comment)?;
    if changed == 0 {
        // Raced with another writer that closed it first.
        return Err(AppError::NoOpenEntry(profile_id));
    }

    let merged = comment.map(str::to_string).or_else(|| open.comment.clone());
    Ok(AttendanceEntry {
        check_out: Some(check_out),
        comment: merged,
        ..open
    })
}

/// Ledger history for a profile, most recent first.
pub fn list_by_profile(
    conn: &Connection,
    profile_id: i64,
    limit: Option<usize>,
) -> AppResult<Vec<AttendanceEntry>> {
    queries::list_entries_by_profile(conn, profile_id, limit)
}
