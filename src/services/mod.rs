//! In-memory demo stores
//!
//! Each store owns its records behind a `parking_lot::RwLock` and hands out
//! clones. Identifiers are incrementing integers; nothing is persisted.

pub mod appointments;
pub mod clients;
pub mod staff;
pub mod users;

pub use appointments::AppointmentStore;
pub use clients::ClientStore;
pub use staff::StaffStore;
pub use users::UserDirectory;
