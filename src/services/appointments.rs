//! Appointment store

use crate::models::appointment::{
    Appointment, AppointmentCreate, AppointmentStatus, AppointmentStatusUpdate,
};
use chrono::{Duration, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;

/// In-memory appointment store seeded with demo bookings
#[derive(Debug)]
pub struct AppointmentStore {
    appointments: RwLock<HashMap<u32, Appointment>>,
    next_id: RwLock<u32>,
}

impl Default for AppointmentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AppointmentStore {
    pub fn new() -> Self {
        let now = Utc::now();
        let seeded = [
            Appointment {
                id: 1,
                client_id: 1,
                staff_member: "Sara Staff".to_string(),
                service: "Deep Tissue Massage".to_string(),
                start_time: now + Duration::hours(2),
                end_time: now + Duration::hours(3),
                status: AppointmentStatus::Scheduled,
            },
            Appointment {
                id: 2,
                client_id: 2,
                staff_member: "Mark Manager".to_string(),
                service: "Facial Treatment".to_string(),
                start_time: now - Duration::days(1),
                end_time: now - Duration::days(1) + Duration::hours(1),
                status: AppointmentStatus::Completed,
            },
        ];

        let next_id = seeded.len() as u32 + 1;
        Self {
            appointments: RwLock::new(seeded.into_iter().map(|a| (a.id, a)).collect()),
            next_id: RwLock::new(next_id),
        }
    }

    /// All appointments ordered by start time
    pub fn list(&self) -> Vec<Appointment> {
        let mut items: Vec<Appointment> = self.appointments.read().values().cloned().collect();
        items.sort_by_key(|a| a.start_time);
        items
    }

    /// Appointments assigned to a staff member, ordered by start time
    pub fn list_for_staff(&self, staff_member: &str) -> Vec<Appointment> {
        let mut items: Vec<Appointment> = self
            .appointments
            .read()
            .values()
            .filter(|a| a.staff_member == staff_member)
            .cloned()
            .collect();
        items.sort_by_key(|a| a.start_time);
        items
    }

    pub fn get(&self, id: u32) -> Option<Appointment> {
        self.appointments.read().get(&id).cloned()
    }

    pub fn create(&self, payload: AppointmentCreate) -> Appointment {
        let mut next_id = self.next_id.write();
        let id = *next_id;
        *next_id += 1;

        let appointment = Appointment {
            id,
            client_id: payload.client_id,
            staff_member: payload.staff_member,
            service: payload.service,
            start_time: payload.start_time,
            end_time: payload.end_time,
            status: AppointmentStatus::Scheduled,
        };
        self.appointments.write().insert(id, appointment.clone());
        appointment
    }

    /// Update an appointment's status; `None` if the id is unknown
    pub fn update_status(&self, id: u32, payload: AppointmentStatusUpdate) -> Option<Appointment> {
        let mut appointments = self.appointments.write();
        let appointment = appointments.get_mut(&id)?;
        appointment.status = payload.status;
        Some(appointment.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_list_is_ordered_by_start_time() {
        let store = AppointmentStore::new();
        let items = store.list();
        assert_eq!(items.len(), 2);
        assert!(items[0].start_time <= items[1].start_time);
    }

    #[test]
    fn test_create_assigns_incrementing_ids() {
        let store = AppointmentStore::new();
        let now = Utc::now();
        let created = store.create(AppointmentCreate {
            client_id: 1,
            staff_member: "Sara Staff".to_string(),
            service: "Body Scrub".to_string(),
            start_time: now,
            end_time: now + Duration::minutes(45),
        });
        assert_eq!(created.id, 3);
        assert_eq!(created.status, AppointmentStatus::Scheduled);
        assert!(store.get(3).is_some());
    }

    #[test]
    fn test_update_status() {
        let store = AppointmentStore::new();
        let updated = store
            .update_status(
                1,
                AppointmentStatusUpdate {
                    status: AppointmentStatus::Canceled,
                },
            )
            .unwrap();
        assert_eq!(updated.status, AppointmentStatus::Canceled);
        assert!(
            store
                .update_status(
                    999,
                    AppointmentStatusUpdate {
                        status: AppointmentStatus::Canceled,
                    },
                )
                .is_none()
        );
    }

    #[test]
    fn test_list_for_staff_filters() {
        let store = AppointmentStore::new();
        let sara = store.list_for_staff("Sara Staff");
        assert_eq!(sara.len(), 1);
        assert_eq!(sara[0].client_id, 1);
        assert!(store.list_for_staff("Nobody").is_empty());
    }
}
