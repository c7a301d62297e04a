use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const MEMBERSHIP_TYPES: &[(&str, &str)] = &[
    ("CICLISTA", "Ciclista"),
    ("ENTRENADOR", "Entrenador"),
    ("EQUIPO_EPN", "Equipo EPN"),
];

pub const PARTICIPATION_LEVELS: &[(&str, &str)] = &[
    ("BEGINNER", "Principiante"),
    ("INTERMEDIATE", "Intermedio"),
    ("ADVANCED", "Avanzado"),
    ("COMPETITIVE", "Competitivo"),
];

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Membership {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub user_id: Option<i64>,
    pub membership_type: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub status: String,
    #[serde(default)]
    pub emergency_contact: Option<String>,
    #[serde(default)]
    pub emergency_phone: Option<String>,
    #[serde(default)]
    pub medical_conditions: Option<String>,
    #[serde(default)]
    pub participation_level: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MembershipState {
    Active,
    Pending,
    Inactive,
    Other,
}

impl Membership {
    pub fn state(&self) -> MembershipState {
        match self.status.to_uppercase().as_str() {
            "ACTIVE" => MembershipState::Active,
            "PENDING" => MembershipState::Pending,
            "INACTIVE" | "EXPIRED" => MembershipState::Inactive,
            _ => MembershipState::Other,
        }
    }

    /// Whole days until `end_date`, negative once expired.
    pub fn days_remaining(&self, today: NaiveDate) -> Option<i64> {
        self.end_date.map(|end| (end - today).num_days())
    }

    /// `EQUIPO_EPN` → `EQUIPO EPN`
    pub fn type_label(&self) -> String {
        self.membership_type.replacen('_', " ", 1)
    }
}

/// Editable fields for `POST /memberships/` and `PUT /memberships/{user_id}`.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct MembershipForm {
    pub membership_type: String,
    pub participation_level: String,
    pub emergency_contact: String,
    pub emergency_phone: String,
    pub medical_conditions: String,
}

impl From<&Membership> for MembershipForm {
    fn from(m: &Membership) -> Self {
        Self {
            membership_type: m.membership_type.clone(),
            participation_level: m.participation_level.clone().unwrap_or_default(),
            emergency_contact: m.emergency_contact.clone().unwrap_or_default(),
            emergency_phone: m.emergency_phone.clone().unwrap_or_default(),
            medical_conditions: m.medical_conditions.clone().unwrap_or_default(),
        }
    }
}

/// Body of `POST /memberships/{id}/request-reactivation`.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ReactivationRequest {
    pub request_date: NaiveDate,
    pub reason: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct ParticipationStats {
    #[serde(default)]
    pub total_events: u32,
    #[serde(default)]
    pub attended_events: u32,
    #[serde(default)]
    pub participation_rate: f64,
}

/// Club-wide counters from `GET /memberships/stats`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct MembershipStats {
    #[serde(default)]
    pub total_memberships: u32,
    /// Count per status (`ACTIVE`, `PENDING`, `INACTIVE`).
    #[serde(default)]
    pub by_status: HashMap<String, u32>,
}

impl MembershipStats {
    pub fn count(&self, status: &str) -> u32 {
        self.by_status.get(status).copied().unwrap_or(0)
    }

    /// Rounded share of `status` over all memberships.
    pub fn percent(&self, status: &str) -> u32 {
        if self.total_memberships == 0 {
            return 0;
        }
        ((self.count(status) as f64 / self.total_memberships as f64) * 100.0).round() as u32
    }
}
