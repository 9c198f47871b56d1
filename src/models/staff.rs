//! Staff member records and service assignments

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Registered sex marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StaffSex {
    M,
    F,
    O,
}

/// Staff member classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StaffKind {
    Technical,
    Administrative,
    Both,
}

/// A staff member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<StaffSex>,
    pub kind: StaffKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub commission_eligible: bool,
    pub monthly_salary: f64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a staff member
#[derive(Debug, Clone, Deserialize)]
pub struct StaffMemberCreate {
    pub name: String,
    #[serde(default)]
    pub sex: Option<StaffSex>,
    pub kind: StaffKind,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub commission_eligible: bool,
    #[serde(default)]
    pub monthly_salary: f64,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Partial update for a staff member; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StaffMemberUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sex: Option<StaffSex>,
    #[serde(default)]
    pub kind: Option<StaffKind>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub commission_eligible: Option<bool>,
    #[serde(default)]
    pub monthly_salary: Option<f64>,
    #[serde(default)]
    pub active: Option<bool>,
}

/// Payload toggling a staff member's active flag
#[derive(Debug, Clone, Deserialize)]
pub struct StaffStatusUpdate {
    pub active: bool,
}

/// A service a staff member is qualified to perform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffServiceAssignment {
    pub staff_id: u32,
    pub service_id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_duration_min: Option<u32>,
    #[serde(default)]
    pub base_price: f64,
    #[serde(default)]
    pub commission_percent: f64,
}
