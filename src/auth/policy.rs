//! Endpoint policy registry
//!
//! Associates each route handler with a declarative access policy under a
//! stable endpoint identifier. The registry is populated at route-registration
//! time and read-only afterwards; lookups never fail because undeclared
//! endpoints fall back to a fail-secure default that still demands
//! authentication.

use crate::auth::identity::Role;
use std::collections::{HashMap, HashSet};

/// Declarative access requirement attached to an endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointPolicy {
    /// Whether authentication is required at all
    pub required: bool,
    /// Minimum role the identity must hold, if any
    pub minimum_role: Option<Role>,
    /// Scopes the identity must hold, all of them
    pub scopes: HashSet<String>,
}

impl Default for EndpointPolicy {
    /// Fail-secure default: an undeclared endpoint still demands a
    /// staff-level authenticated identity.
    fn default() -> Self {
        Self {
            required: true,
            minimum_role: Some(Role::Staff),
            scopes: HashSet::new(),
        }
    }
}

impl EndpointPolicy {
    /// A policy that imposes no gate; the identity is still available to the
    /// handler for personalization.
    pub fn public() -> Self {
        Self {
            required: false,
            minimum_role: None,
            scopes: HashSet::new(),
        }
    }

    /// Require authentication with at least the given role
    pub fn min_role(role: Role) -> Self {
        Self {
            required: true,
            minimum_role: Some(role),
            scopes: HashSet::new(),
        }
    }

    /// Add a required scope
    pub fn with_scope(mut self, scope: &str) -> Self {
        self.scopes.insert(scope.to_string());
        self
    }
}

/// Registry mapping endpoint identifiers to policies
///
/// Written once at startup, shared read-only for the process lifetime.
#[derive(Debug, Default)]
pub struct PolicyRegistry {
    policies: HashMap<String, EndpointPolicy>,
}

impl PolicyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a policy to an endpoint identifier; repeated declaration
    /// overwrites the previous one.
    pub fn declare(&mut self, endpoint: impl Into<String>, policy: EndpointPolicy) {
        self.policies.insert(endpoint.into(), policy);
    }

    /// Resolve the policy for an endpoint; never fails
    pub fn lookup(&self, endpoint: &str) -> EndpointPolicy {
        self.policies.get(endpoint).cloned().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}
