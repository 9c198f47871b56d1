//! Staff store
//!
//! Owns staff member records plus the staff/service assignment table, keyed
//! by `(staff_id, service_id)`.

use crate::models::staff::{
    StaffKind, StaffMember, StaffMemberCreate, StaffMemberUpdate, StaffServiceAssignment,
    StaffSex, StaffStatusUpdate,
};
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;

/// In-memory staff store seeded with demo records
#[derive(Debug)]
pub struct StaffStore {
    members: RwLock<HashMap<u32, StaffMember>>,
    assignments: RwLock<HashMap<(u32, u32), StaffServiceAssignment>>,
    next_id: RwLock<u32>,
}

impl Default for StaffStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StaffStore {
    pub fn new() -> Self {
        let now = Utc::now();
        let seeded = [
            StaffMember {
                id: 1,
                name: "Sara Staff".to_string(),
                sex: Some(StaffSex::F),
                kind: StaffKind::Technical,
                email: Some("staff@example.com".to_string()),
                commission_eligible: true,
                monthly_salary: 0.0,
                active: true,
                created_at: now,
                updated_at: now,
            },
            StaffMember {
                id: 2,
                name: "Mark Manager".to_string(),
                sex: Some(StaffSex::M),
                kind: StaffKind::Administrative,
                email: Some("manager@example.com".to_string()),
                commission_eligible: false,
                monthly_salary: 500.0,
                active: true,
                created_at: now,
                updated_at: now,
            },
        ];

        let next_id = seeded.len() as u32 + 1;
        Self {
            members: RwLock::new(seeded.into_iter().map(|m| (m.id, m)).collect()),
            assignments: RwLock::new(HashMap::new()),
            next_id: RwLock::new(next_id),
        }
    }

    /// All staff members ordered by name
    pub fn list(&self) -> Vec<StaffMember> {
        let mut items: Vec<StaffMember> = self.members.read().values().cloned().collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        items
    }

    pub fn get(&self, id: u32) -> Option<StaffMember> {
        self.members.read().get(&id).cloned()
    }

    pub fn create(&self, payload: StaffMemberCreate) -> StaffMember {
        let mut next_id = self.next_id.write();
        let id = *next_id;
        *next_id += 1;

        let now = Utc::now();
        let member = StaffMember {
            id,
            name: payload.name,
            sex: payload.sex,
            kind: payload.kind,
            email: payload.email,
            commission_eligible: payload.commission_eligible,
            monthly_salary: payload.monthly_salary,
            active: payload.active,
            created_at: now,
            updated_at: now,
        };
        self.members.write().insert(id, member.clone());
        member
    }

    /// Apply a partial update; `None` if the id is unknown
    pub fn update(&self, id: u32, payload: StaffMemberUpdate) -> Option<StaffMember> {
        let mut members = self.members.write();
        let member = members.get_mut(&id)?;

        if let Some(name) = payload.name {
            member.name = name;
        }
        if let Some(sex) = payload.sex {
            member.sex = Some(sex);
        }
        if let Some(kind) = payload.kind {
            member.kind = kind;
        }
        if let Some(email) = payload.email {
            member.email = Some(email);
        }
        if let Some(commission_eligible) = payload.commission_eligible {
            member.commission_eligible = commission_eligible;
        }
        if let Some(monthly_salary) = payload.monthly_salary {
            member.monthly_salary = monthly_salary;
        }
        if let Some(active) = payload.active {
            member.active = active;
        }
        member.updated_at = Utc::now();
        Some(member.clone())
    }

    /// Toggle the active flag; `None` if the id is unknown
    pub fn update_status(&self, id: u32, payload: StaffStatusUpdate) -> Option<StaffMember> {
        let mut members = self.members.write();
        let member = members.get_mut(&id)?;
        member.active = payload.active;
        member.updated_at = Utc::now();
        Some(member.clone())
    }

    /// Service assignments for a staff member, ordered by service id
    pub fn list_assignments(&self, staff_id: u32) -> Vec<StaffServiceAssignment> {
        let mut items: Vec<StaffServiceAssignment> = self
            .assignments
            .read()
            .values()
            .filter(|a| a.staff_id == staff_id)
            .cloned()
            .collect();
        items.sort_by_key(|a| a.service_id);
        items
    }

    /// Create or replace the assignment for `(staff_id, service_id)`
    pub fn upsert_assignment(&self, payload: StaffServiceAssignment) -> StaffServiceAssignment {
        let key = (payload.staff_id, payload.service_id);
        self.assignments.write().insert(key, payload.clone());
        payload
    }
}
