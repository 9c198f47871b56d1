//! Shared application state

use crate::auth::{AuthSystem, PolicyRegistry};
use crate::config::Settings;
use crate::server::routes;
use crate::services::{AppointmentStore, ClientStore, StaffStore, UserDirectory};
use crate::utils::error::Result;
use std::sync::Arc;

/// State shared by all request handlers
///
/// Everything inside is either immutable after startup or internally locked,
/// so the state clones cheaply into each worker.
#[derive(Clone)]
pub struct AppState {
    /// Process settings
    pub settings: Settings,
    /// Authentication and authorization system
    pub auth: Arc<AuthSystem>,
    /// Appointment store
    pub appointments: Arc<AppointmentStore>,
    /// Client store
    pub clients: Arc<ClientStore>,
    /// Staff store
    pub staff: Arc<StaffStore>,
    /// User account directory
    pub users: Arc<UserDirectory>,
}

impl AppState {
    /// Build the application state, declaring every endpoint policy up front
    pub fn new(settings: Settings) -> Result<Self> {
        let mut policies = PolicyRegistry::new();
        routes::declare_policies(&mut policies);

        let auth = AuthSystem::new(&settings, policies)?;

        Ok(Self {
            settings,
            auth: Arc::new(auth),
            appointments: Arc::new(AppointmentStore::new()),
            clients: Arc::new(ClientStore::new()),
            staff: Arc::new(StaffStore::new()),
            users: Arc::new(UserDirectory::new()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_declares_policies() {
        let state = AppState::new(Settings::default()).unwrap();
        assert!(!state.auth.policies().is_empty());
    }
}
