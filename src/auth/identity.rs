//! Role and identity model
//!
//! Roles form a small ordered privilege lattice; scopes are an unordered set
//! of fine-grained permission names held alongside the role.

use crate::utils::error::SpaError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ordered privilege tier
///
/// Comparison follows integer rank: `a >= b` means a's privilege subsumes b's.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum Role {
    Guest = 1,
    Staff = 2,
    Manager = 3,
    Admin = 4,
    Owner = 5,
}

impl Role {
    /// Numeric rank used for ordering and the wire representation
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Construct a role from a known name (case-insensitive)
    pub fn from_name(name: &str) -> Result<Self, SpaError> {
        match name.to_ascii_lowercase().as_str() {
            "guest" => Ok(Role::Guest),
            "staff" => Ok(Role::Staff),
            "manager" => Ok(Role::Manager),
            "admin" => Ok(Role::Admin),
            "owner" => Ok(Role::Owner),
            other => Err(SpaError::validation(format!("Unknown role name: {}", other))),
        }
    }
}

impl TryFrom<u8> for Role {
    type Error = SpaError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Role::Guest),
            2 => Ok(Role::Staff),
            3 => Ok(Role::Manager),
            4 => Ok(Role::Admin),
            5 => Ok(Role::Owner),
            other => Err(SpaError::validation(format!("Invalid role value: {}", other))),
        }
    }
}

impl From<Role> for u8 {
    fn from(role: Role) -> Self {
        role as u8
    }
}

/// The actor attached to a request by the authentication middleware
///
/// Anonymous is a first-class variant rather than a sentinel username, so
/// "unauthenticated" can never be confused with a real account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// No usable credential was presented (or the token failed to verify)
    Anonymous,
    /// A verified token was presented
    Authenticated {
        username: String,
        role: Role,
        scopes: HashSet<String>,
        full_name: Option<String>,
    },
}

impl Identity {
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Identity::Anonymous)
    }

    /// Effective role; anonymous requests act as guests
    pub fn role(&self) -> Role {
        match self {
            Identity::Anonymous => Role::Guest,
            Identity::Authenticated { role, .. } => *role,
        }
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            Identity::Anonymous => None,
            Identity::Authenticated { username, .. } => Some(username),
        }
    }

    pub fn full_name(&self) -> Option<&str> {
        match self {
            Identity::Anonymous => None,
            Identity::Authenticated { full_name, .. } => full_name.as_deref(),
        }
    }

    /// Whether this identity's role satisfies the given minimum
    pub fn has_role(&self, minimum: Role) -> bool {
        self.role() >= minimum
    }

    pub fn has_scope(&self, scope: &str) -> bool {
        match self {
            Identity::Anonymous => false,
            Identity::Authenticated { scopes, .. } => scopes.contains(scope),
        }
    }

    /// Subset test: every required scope must be held
    pub fn has_scopes(&self, required: &HashSet<String>) -> bool {
        self.missing_scopes(required).is_empty()
    }

    /// Required scopes this identity lacks, sorted for stable error messages
    pub fn missing_scopes(&self, required: &HashSet<String>) -> Vec<String> {
        let held: Option<&HashSet<String>> = match self {
            Identity::Anonymous => None,
            Identity::Authenticated { scopes, .. } => Some(scopes),
        };

        let mut missing: Vec<String> = required
            .iter()
            .filter(|scope| held.is_none_or(|s| !s.contains(*scope)))
            .cloned()
            .collect();
        missing.sort();
        missing
    }
}
