use crate::errors::{AppError, AppResult};
use crate::models::attendance::AttendanceEntry;
use crate::models::presence_status::PresenceStatus;
use crate::models::profile::Profile;
use crate::utils::time;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, ErrorCode, OptionalExtension, Result, Row, params};

pub fn map_profile_row(row: &Row) -> Result<Profile> {
    let status_str: String = row.get("presence_status")?;
    let presence_status = PresenceStatus::from_db_str(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidStatus(status_str.clone())),
        )
    })?;

    Ok(Profile {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        lab: row.get("lab")?,
        is_checked_in: row.get::<_, i64>("is_checked_in")? == 1,
        presence_status,
    })
}

pub fn map_entry_row(row: &Row) -> Result<AttendanceEntry> {
    let check_in_str: String = row.get("check_in")?;
    let check_in = parse_ts_column(&check_in_str)?;

    let check_out = match row.get::<_, Option<String>>("check_out")? {
        Some(s) => Some(parse_ts_column(&s)?),
        None => None,
    };

    Ok(AttendanceEntry {
        id: row.get("id")?,
        profile_id: row.get("profile_id")?,
        check_in,
        check_out,
        comment: row.get("comment")?,
    })
}

fn parse_ts_column(s: &str) -> Result<DateTime<Utc>> {
    time::from_db_str(s).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation
    )
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

pub fn insert_profile(
    conn: &Connection,
    user_id: &str,
    name: &str,
    email: &str,
    lab: &str,
) -> AppResult<i64> {
    let res = conn.execute(
        "INSERT INTO profiles (user_id, name, email, lab, is_checked_in, presence_status)
         VALUES (?1, ?2, ?3, ?4, 0, 'OFF_CAMPUS')",
        params![user_id, name, email, lab],
    );

    match res {
        Ok(_) => Ok(conn.last_insert_rowid()),
        Err(e) if is_constraint_violation(&e) => {
            Err(AppError::DuplicateProfile(user_id.to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

pub fn find_profile_by_user(conn: &Connection, user_id: &str) -> AppResult<Option<Profile>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM profiles WHERE user_id = ?1")?;
    Ok(stmt.query_row([user_id], map_profile_row).optional()?)
}

pub fn find_profile_by_id(conn: &Connection, profile_id: i64) -> AppResult<Option<Profile>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM profiles WHERE id = ?1")?;
    Ok(stmt.query_row([profile_id], map_profile_row).optional()?)
}

/// Single UPDATE writing both denormalized presence fields.
/// Only `core::reconcile` may call this; returns the affected row count so
/// the caller can surface a missing profile.
pub fn update_presence(
    conn: &Connection,
    profile_id: i64,
    status: PresenceStatus,
) -> AppResult<usize> {
    let mut stmt = conn.prepare_cached(
        "UPDATE profiles SET presence_status = ?1, is_checked_in = ?2 WHERE id = ?3",
    )?;
    let changed = stmt.execute(params![
        status.to_db_str(),
        if status.is_in_lab() { 1 } else { 0 },
        profile_id
    ])?;
    Ok(changed)
}

/// Roster query: optionally filtered by lab and/or presence bucket,
/// checked-in members first, then by name.
pub fn list_profiles(
    conn: &Connection,
    lab: Option<&str>,
    status: Option<PresenceStatus>,
) -> AppResult<Vec<Profile>> {
    let mut sql = "SELECT * FROM profiles".to_string();
    let mut conditions: Vec<&str> = Vec::new();
    let mut owned_params: Vec<String> = Vec::new();

    if let Some(l) = lab {
        conditions.push("lab = ?");
        owned_params.push(l.to_string());
    }
    if let Some(s) = status {
        conditions.push("presence_status = ?");
        owned_params.push(s.to_db_str().to_string());
    }

    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }
    sql.push_str(" ORDER BY is_checked_in DESC, name ASC");

    let mut stmt = conn.prepare_cached(&sql)?;
    let param_refs: Vec<&dyn rusqlite::ToSql> =
        owned_params.iter().map(|s| s as &dyn rusqlite::ToSql).collect();
    let rows = stmt.query_map(param_refs.as_slice(), map_profile_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Attendance ledger
// ---------------------------------------------------------------------------

/// Insert a new open entry. The partial unique index rejects a second open
/// entry for the same profile even under concurrent writers.
pub fn insert_entry(
    conn: &Connection,
    profile_id: i64,
    check_in: DateTime<Utc>,
    comment: Option<&str>,
) -> AppResult<AttendanceEntry> {
    let res = conn.execute(
        "INSERT INTO attendance (profile_id, check_in, check_out, comment)
         VALUES (?1, ?2, NULL, ?3)",
        params![profile_id, time::to_db_str(check_in), comment],
    );

    match res {
        Ok(_) => Ok(AttendanceEntry {
            id: conn.last_insert_rowid(),
            profile_id,
            check_in,
            check_out: None,
            comment: comment.map(str::to_string),
        }),
        Err(e) if is_constraint_violation(&e) => Err(AppError::DuplicateOpenEntry(profile_id)),
        Err(e) => Err(e.into()),
    }
}

/// The open entry for a profile, newest check-in first as a defensive
/// tie-break should duplicates ever exist.
pub fn find_open_entry(conn: &Connection, profile_id: i64) -> AppResult<Option<AttendanceEntry>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM attendance
         WHERE profile_id = ?1 AND check_out IS NULL
         ORDER BY check_in DESC
         LIMIT 1",
    )?;
    Ok(stmt.query_row([profile_id], map_entry_row).optional()?)
}

/// Close an entry: the single mutation an entry ever receives.
pub fn close_entry(
    conn: &Connection,
    entry_id: i64,
    check_out: DateTime<Utc>,
    comment: Option<&str>,
) -> AppResult<usize> {
    let mut stmt = conn.prepare_cached(
        "UPDATE attendance
         SET check_out = ?1, comment = COALESCE(?2, comment)
         WHERE id = ?3 AND check_out IS NULL",
    )?;
    let changed = stmt.execute(params![time::to_db_str(check_out), comment, entry_id])?;
    Ok(changed)
}

/// Full ledger history for a profile, most recent first.
pub fn list_entries_by_profile(
    conn: &Connection,
    profile_id: i64,
    limit: Option<usize>,
) -> AppResult<Vec<AttendanceEntry>> {
    let mut sql = "SELECT * FROM attendance WHERE profile_id = ?1 ORDER BY check_in DESC".to_string();
    if let Some(n) = limit {
        sql.push_str(&format!(" LIMIT {n}"));
    }

    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt.query_map([profile_id], map_entry_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// All IN_LAB profiles joined with their open entry, for the reminder
/// sweep. Profiles whose open entry is missing are skipped here; the
/// per-transition reconciliation path repairs them on their next action.
pub fn active_profiles_with_open_entry(
    conn: &Connection,
) -> AppResult<Vec<(Profile, AttendanceEntry)>> {
    let mut stmt = conn.prepare_cached(
        "SELECT p.id, p.user_id, p.name, p.email, p.lab, p.is_checked_in, p.presence_status,
                a.id AS entry_id, a.profile_id, a.check_in, a.check_out, a.comment
         FROM profiles p
         JOIN attendance a ON a.profile_id = p.id AND a.check_out IS NULL
         WHERE p.presence_status = 'IN_LAB'
         ORDER BY p.id ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        let profile = map_profile_row(row)?;
        let check_in_str: String = row.get("check_in")?;
        let check_in = parse_ts_column(&check_in_str)?;
        let entry = AttendanceEntry {
            id: row.get("entry_id")?,
            profile_id: row.get("profile_id")?,
            check_in,
            check_out: None,
            comment: row.get("comment")?,
        };
        Ok((profile, entry))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
