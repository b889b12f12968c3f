use crate::models::attendance::AttendanceEntry;
use crate::utils::time;
use serde::Serialize;

/// Flat per-entry row for CSV/JSON export.
#[derive(Serialize, Clone, Debug)]
pub struct EntryExport {
    pub id: i64,
    pub user_id: String,
    pub check_in: String,
    pub check_out: String,
    pub duration_minutes: Option<i64>,
    pub comment: String,
}

pub(crate) fn get_headers() -> Vec<&'static str> {
    vec![
        "id",
        "user_id",
        "check_in",
        "check_out",
        "duration_minutes",
        "comment",
    ]
}

impl EntryExport {
    pub fn from_entry(entry: &AttendanceEntry, user_id: &str) -> Self {
        Self {
            id: entry.id,
            user_id: user_id.to_string(),
            check_in: time::to_db_str(entry.check_in),
            check_out: entry.check_out.map(time::to_db_str).unwrap_or_default(),
            duration_minutes: entry.duration_minutes(),
            comment: entry.comment.clone().unwrap_or_default(),
        }
    }

    pub(crate) fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.user_id.clone(),
            self.check_in.clone(),
            self.check_out.clone(),
            self.duration_minutes
                .map(|m| m.to_string())
                .unwrap_or_default(),
            self.comment.clone(),
        ]
    }
}
