use super::presence_status::PresenceStatus;

/// What a presence transition actually did.
///
/// `AlreadyInState` and `Reset` are structured non-error outcomes: callers
/// must be able to show "already checked in" or "state was reset, please
/// retry" instead of an error banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The requested transition was applied.
    Applied,
    /// The profile was already in the target state; nothing changed.
    AlreadyInState,
    /// Profile/ledger mismatch detected; presence was reset to OFF_CAMPUS.
    Reset,
}

#[derive(Debug, Clone, Copy)]
pub struct TransitionResult {
    pub outcome: TransitionOutcome,
    pub new_status: PresenceStatus,
}

/// Result of a defensive profile-vs-ledger check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    Consistent,
    Reset,
}
