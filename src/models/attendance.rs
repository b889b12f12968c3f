use chrono::{DateTime, Utc};
use serde::Serialize;

/// One check-in/check-out interval in the append-only ledger.
///
/// An entry is created by a transition into the lab, mutated exactly once
/// (checkout timestamp + optional comment) on the way out, and retained
/// permanently for history and reporting. `check_out == None` marks the
/// single "open" entry a profile may have.
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceEntry {
    pub id: i64,
    pub profile_id: i64,
    pub check_in: DateTime<Utc>,
    pub check_out: Option<DateTime<Utc>>,
    pub comment: Option<String>,
}

impl AttendanceEntry {
    pub fn is_open(&self) -> bool {
        self.check_out.is_none()
    }

    /// Net minutes between check-in and check-out, computed from the
    /// stored instants directly. None while the entry is still open.
    pub fn duration_minutes(&self) -> Option<i64> {
        self.check_out.map(|out| (out - self.check_in).num_minutes())
    }
}
