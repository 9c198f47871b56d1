//! Client records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A spa client profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: u32,
    pub full_name: String,
    pub email: String,
    pub membership_level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_visit: Option<NaiveDate>,
}

/// Payload for creating a client
#[derive(Debug, Clone, Deserialize)]
pub struct ClientCreate {
    pub full_name: String,
    pub email: String,
    pub membership_level: String,
}
