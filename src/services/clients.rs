//! Client store

use crate::models::client::{Client, ClientCreate};
use chrono::NaiveDate;
use parking_lot::RwLock;
use std::collections::HashMap;

/// In-memory client store seeded with demo profiles
#[derive(Debug)]
pub struct ClientStore {
    clients: RwLock<HashMap<u32, Client>>,
    next_id: RwLock<u32>,
}

impl Default for ClientStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientStore {
    pub fn new() -> Self {
        let seeded = [
            Client {
                id: 1,
                full_name: "Célia Cliente".to_string(),
                email: "celia@example.com".to_string(),
                membership_level: "gold".to_string(),
                last_visit: NaiveDate::from_ymd_opt(2026, 5, 14),
            },
            Client {
                id: 2,
                full_name: "Pedro Patrono".to_string(),
                email: "peter@example.com".to_string(),
                membership_level: "silver".to_string(),
                last_visit: None,
            },
        ];

        let next_id = seeded.len() as u32 + 1;
        Self {
            clients: RwLock::new(seeded.into_iter().map(|c| (c.id, c)).collect()),
            next_id: RwLock::new(next_id),
        }
    }

    /// All clients ordered by name
    pub fn list(&self) -> Vec<Client> {
        let mut items: Vec<Client> = self.clients.read().values().cloned().collect();
        items.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        items
    }

    pub fn get(&self, id: u32) -> Option<Client> {
        self.clients.read().get(&id).cloned()
    }

    pub fn create(&self, payload: ClientCreate) -> Client {
        let mut next_id = self.next_id.write();
        let id = *next_id;
        *next_id += 1;

        let client = Client {
            id,
            full_name: payload.full_name,
            email: payload.email,
            membership_level: payload.membership_level,
            last_visit: None,
        };
        self.clients.write().insert(id, client.clone());
        client
    }
}
