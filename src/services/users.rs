//! User directory
//!
//! Demo account table with plain-text passwords. This backs the token
//! endpoints only; swapping it for a real credential store means replacing
//! `authenticate`.

use crate::auth::Role;
use crate::models::user::User;
use std::collections::HashMap;
use tracing::debug;

struct Account {
    password: String,
    active: bool,
    user: User,
}

/// Read-only directory of demo accounts
pub struct UserDirectory {
    accounts: HashMap<String, Account>,
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl UserDirectory {
    pub fn new() -> Self {
        let seeded = [
            Account {
                password: "gaby_dono".to_string(),
                active: true,
                user: User {
                    username: "gaby_dono".to_string(),
                    full_name: Some("Gaby Dono".to_string()),
                    role: Role::Owner,
                    scopes: vec![
                        "appointments:write".to_string(),
                        "clients:write".to_string(),
                        "staff:manage".to_string(),
                    ],
                },
            },
            Account {
                password: "spa-manager".to_string(),
                active: true,
                user: User {
                    username: "manager".to_string(),
                    full_name: Some("Mark Manager".to_string()),
                    role: Role::Manager,
                    scopes: vec![
                        "appointments:write".to_string(),
                        "clients:write".to_string(),
                    ],
                },
            },
            Account {
                password: "spa-staff".to_string(),
                active: true,
                user: User {
                    username: "staff".to_string(),
                    full_name: Some("Sara Staff".to_string()),
                    role: Role::Staff,
                    scopes: vec![
                        "appointments:read".to_string(),
                        "clients:read".to_string(),
                    ],
                },
            },
            Account {
                password: "celia-cliente".to_string(),
                active: true,
                user: User {
                    username: "celia".to_string(),
                    full_name: Some("Célia Cliente".to_string()),
                    role: Role::Guest,
                    scopes: vec![],
                },
            },
            Account {
                password: "pedro-cliente".to_string(),
                active: true,
                user: User {
                    username: "pedro".to_string(),
                    full_name: Some("Pedro Patrono".to_string()),
                    role: Role::Guest,
                    scopes: vec![],
                },
            },
        ];

        Self {
            accounts: seeded
                .into_iter()
                .map(|a| (a.user.username.clone(), a))
                .collect(),
        }
    }

    /// Verify credentials; `None` on unknown user, wrong password, or an
    /// inactive account. Callers map `None` to a credential error without
    /// distinguishing the cases.
    pub fn authenticate(&self, username: &str, password: &str) -> Option<User> {
        let account = self.accounts.get(username)?;
        if !account.active || account.password != password {
            debug!("Authentication failed for user: {}", username);
            return None;
        }
        Some(account.user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticate_valid_credentials() {
        let directory = UserDirectory::new();
        let user = directory.authenticate("manager", "spa-manager").unwrap();
        assert_eq!(user.role, Role::Manager);
        assert!(user.scopes.contains(&"appointments:write".to_string()));
        assert!(!user.scopes.contains(&"staff:manage".to_string()));
    }

    #[test]
    fn test_authenticate_wrong_password() {
        let directory = UserDirectory::new();
        assert!(directory.authenticate("manager", "nope").is_none());
    }

    #[test]
    fn test_authenticate_unknown_user() {
        let directory = UserDirectory::new();
        assert!(directory.authenticate("ghost", "anything").is_none());
    }

    #[test]
    fn test_owner_has_all_scopes() {
        let directory = UserDirectory::new();
        let owner = directory.authenticate("gaby_dono", "gaby_dono").unwrap();
        assert_eq!(owner.role, Role::Owner);
        assert_eq!(owner.scopes.len(), 3);
    }

    #[test]
    fn test_guest_accounts_have_no_scopes() {
        let directory = UserDirectory::new();
        let celia = directory.authenticate("celia", "celia-cliente").unwrap();
        assert_eq!(celia.role, Role::Guest);
        assert!(celia.scopes.is_empty());
    }
}
