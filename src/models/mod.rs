//! Domain models
//!
//! Request/response bodies and the in-memory records owned by the demo
//! stores. The authorization core never inspects these beyond the `User`
//! record it mints tokens from.

pub mod appointment;
pub mod client;
pub mod staff;
pub mod user;

pub use appointment::{Appointment, AppointmentCreate, AppointmentStatus, AppointmentStatusUpdate};
pub use client::{Client, ClientCreate};
pub use staff::{
    StaffKind, StaffMember, StaffMemberCreate, StaffMemberUpdate, StaffServiceAssignment,
    StaffSex, StaffStatusUpdate,
};
pub use user::{TokenRequest, TokenResponse, User};
