//! Presence state machine: IN_LAB ⇄ ON_CAMPUS ⇄ OFF_CAMPUS.
//!
//! Every target state has its own guards and side effects, dispatched in a
//! single `match`. Ordering rule for two-step paths: the ledger write
//! happens first, the profile write second; the profile write is the one
//! that decides success from the caller's point of view. If the profile
//! write fails after a ledger mutation, the mismatch is picked up by the
//! reconciliation check on the next transition.

use crate::core::{ledger, reconcile};
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::outcome::{TransitionOutcome, TransitionResult};
use crate::models::presence_status::PresenceStatus;
use rusqlite::Connection;

/// Move a profile to `target`, returning what actually happened.
///
/// Never errors for "already in that state" or for a repairable
/// profile/ledger mismatch; those come back as `AlreadyInState` and
/// `Reset`. A missing profile is the one hard failure.
pub fn transition(
    conn: &Connection,
    profile_id: i64,
    target: PresenceStatus,
    comment: Option<&str>,
) -> AppResult<TransitionResult> {
    let profile = queries::find_profile_by_id(conn, profile_id)?
        .ok_or(AppError::ProfileIdNotFound(profile_id))?;

    let open_entry = queries::find_open_entry(conn, profile_id)?;

    match target {
        PresenceStatus::InLab => {
            if let Some(_entry) = open_entry {
                // The ledger wins for open entries: if the profile somehow
                // disagrees, repair it while reporting the no-op.
                if !profile.presence_status.is_in_lab() {
                    reconcile::set_presence(conn, profile_id, PresenceStatus::InLab)?;
                }
                return Ok(TransitionResult {
                    outcome: TransitionOutcome::AlreadyInState,
                    new_status: PresenceStatus::InLab,
                });
            }

            // Ledger first, profile second.
            ledger::open_entry(conn, profile_id, comment)?;
            reconcile::set_presence(conn, profile_id, PresenceStatus::InLab)?;

            Ok(TransitionResult {
                outcome: TransitionOutcome::Applied,
                new_status: PresenceStatus::InLab,
            })
        }

        PresenceStatus::OnCampus | PresenceStatus::OffCampus => {
            if open_entry.is_some() {
                // Checkout path: close the open interval, then move the
                // profile. This also covers a profile that wrongly claims
                // ON/OFF_CAMPUS while an entry is still open.
                ledger::close_most_recent_open_entry(conn, profile_id, comment)?;
                reconcile::set_presence(conn, profile_id, target)?;

                return Ok(TransitionResult {
                    outcome: TransitionOutcome::Applied,
                    new_status: target,
                });
            }

            if profile.presence_status.is_in_lab() {
                // Profile says IN_LAB but the ledger has no open entry.
                // Throwing would strand the user; reset instead and let
                // them retry.
                reconcile::set_presence(conn, profile_id, PresenceStatus::OffCampus)?;
                return Ok(TransitionResult {
                    outcome: TransitionOutcome::Reset,
                    new_status: PresenceStatus::OffCampus,
                });
            }

            if profile.presence_status == target {
                return Ok(TransitionResult {
                    outcome: TransitionOutcome::AlreadyInState,
                    new_status: target,
                });
            }

            // Pure campus-level move, no ledger interaction.
            reconcile::set_presence(conn, profile_id, target)?;
            Ok(TransitionResult {
                outcome: TransitionOutcome::Applied,
                new_status: target,
            })
        }
    }
}

/// Resolve an external user id to its profile and run the transition.
/// This is the entry point the CLI (the excluded trigger surface) uses.
pub fn transition_user(
    conn: &Connection,
    user_id: &str,
    target: PresenceStatus,
    comment: Option<&str>,
) -> AppResult<TransitionResult> {
    let profile = queries::find_profile_by_user(conn, user_id)?
        .ok_or_else(|| AppError::ProfileNotFound(user_id.to_string()))?;

    transition(conn, profile.id, target, comment)
}
