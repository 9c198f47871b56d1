//! Appointment records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of an appointment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Canceled,
}

/// A booked appointment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: u32,
    pub client_id: u32,
    pub staff_member: String,
    pub service: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: AppointmentStatus,
}

/// Payload for creating an appointment
#[derive(Debug, Clone, Deserialize)]
pub struct AppointmentCreate {
    pub client_id: u32,
    pub staff_member: String,
    pub service: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// Payload for updating an appointment's status
#[derive(Debug, Clone, Deserialize)]
pub struct AppointmentStatusUpdate {
    pub status: AppointmentStatus,
}
