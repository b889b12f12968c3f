use serde::Serialize;

/// Where a user currently is, as shown on the dashboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PresenceStatus {
    InLab,     // physically in the lab, open ledger entry
    OnCampus,  // nearby but not in the lab
    OffCampus, // absent
}

impl PresenceStatus {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            PresenceStatus::InLab => "IN_LAB",
            PresenceStatus::OnCampus => "ON_CAMPUS",
            PresenceStatus::OffCampus => "OFF_CAMPUS",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "IN_LAB" => Some(PresenceStatus::InLab),
            "ON_CAMPUS" => Some(PresenceStatus::OnCampus),
            "OFF_CAMPUS" => Some(PresenceStatus::OffCampus),
            _ => None,
        }
    }

    /// Helper: convert input code from CLI (accepts a few spellings)
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_lowercase().as_str() {
            "in-lab" | "in_lab" | "lab" => Some(PresenceStatus::InLab),
            "on-campus" | "on_campus" | "campus" => Some(PresenceStatus::OnCampus),
            "off-campus" | "off_campus" | "off" => Some(PresenceStatus::OffCampus),
            _ => None,
        }
    }

    /// Human readable label for status lines and rosters.
    pub fn label(&self) -> &'static str {
        match self {
            PresenceStatus::InLab => "in lab",
            PresenceStatus::OnCampus => "on campus",
            PresenceStatus::OffCampus => "off campus",
        }
    }

    pub fn is_in_lab(&self) -> bool {
        matches!(self, PresenceStatus::InLab)
    }
}
