//! End-of-day reminder sweep: forcibly checks out everyone still IN_LAB,
//! then fires a checkout notification per user.
//!
//! Profiles are processed in fixed-size batches to bound concurrent load;
//! batches run sequentially, profiles within a batch concurrently, each
//! worker on its own SQLite connection. For one user the order is always
//! ledger close → presence write → notification; across users there is no
//! ordering guarantee. Per-user failures are isolated and collected, so
//! one bad profile never aborts the rest.

use crate::core::notify::CheckoutNotifier;
use crate::core::{ledger, reconcile};
use crate::db::pool::DbPool;
use crate::db::{log, queries};
use crate::errors::{AppError, AppResult};
use crate::models::attendance::AttendanceEntry;
use crate::models::presence_status::PresenceStatus;
use crate::models::profile::Profile;
use crate::ui::messages;
use std::thread;

/// Small on purpose: caps peak concurrency against the data store and the
/// notification transport (matches the original deployment's batching).
pub const DEFAULT_BATCH_SIZE: usize = 3;

#[derive(Debug, Clone)]
pub struct SweepReport {
    pub processed: usize,
    pub failures: Vec<i64>,
}

/// Run the full sweep against the database at `db_path`.
///
/// Safe to invoke twice in quick succession: the second run simply finds
/// no IN_LAB profiles left.
pub fn run_sweep(
    db_path: &str,
    notifier: &dyn CheckoutNotifier,
    batch_size: usize,
) -> AppResult<SweepReport> {
    let actives = {
        let pool = DbPool::new(db_path)?;
        queries::active_profiles_with_open_entry(&pool.conn)?
    };

    let report = sweep_profiles(db_path, &actives, notifier, batch_size);

    // Summary goes to the internal log; a logging failure never fails the
    // sweep itself.
    if let Ok(pool) = DbPool::new(db_path) {
        let _ = log::ttlog(
            &pool.conn,
            "sweep",
            "",
            &format!(
                "sweep completed: {} processed, {} failed",
                report.processed,
                report.failures.len()
            ),
        );
    }

    Ok(report)
}

/// Core batch loop, separated from the query so the isolation behavior is
/// testable against an arbitrary snapshot of active profiles.
pub fn sweep_profiles(
    db_path: &str,
    actives: &[(Profile, AttendanceEntry)],
    notifier: &dyn CheckoutNotifier,
    batch_size: usize,
) -> SweepReport {
    let mut processed = 0usize;
    let mut failures: Vec<i64> = Vec::new();

    for batch in actives.chunks(batch_size.max(1)) {
        let results: Vec<(i64, AppResult<()>)> = thread::scope(|scope| {
            let handles: Vec<_> = batch
                .iter()
                .map(|(profile, entry)| {
                    scope.spawn(move || {
                        (profile.id, process_profile(db_path, profile, entry, notifier))
                    })
                })
                .collect();

            handles
                .into_iter()
                .zip(batch.iter())
                .map(|(handle, (profile, _))| {
                    handle.join().unwrap_or_else(|_| {
                        (
                            profile.id,
                            Err(AppError::Other("sweep worker panicked".into())),
                        )
                    })
                })
                .collect()
        });

        for (profile_id, result) in results {
            match result {
                Ok(()) => processed += 1,
                Err(e) => {
                    messages::error(format!("Sweep failed for profile {profile_id}: {e}"));
                    failures.push(profile_id);
                }
            }
        }
    }

    SweepReport { processed, failures }
}

/// Force-checkout a single profile, then notify.
///
/// The notification fires only after both state writes succeed, and its
/// failure is logged rather than propagated: the state transition is the
/// source of truth, the reminder is best effort.
fn process_profile(
    db_path: &str,
    profile: &Profile,
    entry: &AttendanceEntry,
    notifier: &dyn CheckoutNotifier,
) -> AppResult<()> {
    let pool = DbPool::new(db_path)?;

    match ledger::close_most_recent_open_entry(&pool.conn, profile.id, None) {
        Ok(_) => {}
        Err(AppError::NoOpenEntry(_)) => {
            // The user checked out between the snapshot and now. Make sure
            // the profile agrees with the ledger and move on; nothing to
            // notify about.
            if let Some(fresh) = queries::find_profile_by_id(&pool.conn, profile.id)? {
                reconcile::reconcile_if_inconsistent(&pool.conn, &fresh)?;
            }
            return Ok(());
        }
        Err(e) => return Err(e),
    }

    reconcile::set_presence(&pool.conn, profile.id, PresenceStatus::OffCampus)?;

    if !profile.email.is_empty() {
        if let Err(e) = notifier.send_checkout_reminder(
            &profile.email,
            &profile.name,
            &profile.user_id,
            entry.check_in,
        ) {
            messages::warning(format!(
                "Reminder notification failed for {}: {e}",
                profile.user_id
            ));
            let _ = log::ttlog(
                &pool.conn,
                "sweep",
                &profile.user_id,
                &format!("notification failed: {e}"),
            );
        }
    }

    Ok(())
}
