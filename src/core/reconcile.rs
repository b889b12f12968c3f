//! Single writer of the denormalized presence fields.
//!
//! `presence_status` and the legacy `is_checked_in` boolean are two views
//! of one state; every write goes through `set_presence` as a single
//! UPDATE so they can never disagree.

use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::outcome::ReconcileOutcome;
use crate::models::presence_status::PresenceStatus;
use crate::models::profile::Profile;
use rusqlite::Connection;

pub fn set_presence(conn: &Connection, profile_id: i64, status: PresenceStatus) -> AppResult<()> {
    let changed = queries::update_presence(conn, profile_id, status)?;
    if changed == 0 {
        return Err(AppError::ProfileIdNotFound(profile_id));
    }
    Ok(())
}

/// Defensive profile-vs-ledger check, run at the start of checkout-style
/// transitions and by the reminder sweep.
///
/// A profile claiming IN_LAB with no open ledger entry is stranded: any
/// checkout would fail forever. Force it to OFF_CAMPUS and report `Reset`
/// so the caller can tell the user to retry.
pub fn reconcile_if_inconsistent(
    conn: &Connection,
    profile: &Profile,
) -> AppResult<ReconcileOutcome> {
    if profile.presence_status.is_in_lab()
        && queries::find_open_entry(conn, profile.id)?.is_none()
    {
        set_presence(conn, profile.id, PresenceStatus::OffCampus)?;
        return Ok(ReconcileOutcome::Reset);
    }

    Ok(ReconcileOutcome::Consistent)
}
