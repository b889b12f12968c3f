use super::presence_status::PresenceStatus;
use serde::Serialize;

/// A user's presence/account record.
///
/// `is_checked_in` is a legacy redundant boolean kept for the older
/// dashboards; it must always equal `presence_status == InLab`. Only the
/// reconciler writes it (see `core::reconcile`).
#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub id: i64,
    pub user_id: String, // external identity, resolved by the caller
    pub name: String,
    pub email: String, // may be empty; such users are never notified
    pub lab: String,   // grouping key for the roster
    pub is_checked_in: bool,
    pub presence_status: PresenceStatus,
}
