//! Per-route authorization guard
//!
//! Invoked explicitly by each handler after the middleware has attached an
//! identity. Pure and side-effect-free: the same identity and policy always
//! produce the same outcome, so calling it twice per request is safe.

use crate::auth::identity::Identity;
use crate::auth::policy::PolicyRegistry;
use crate::utils::error::{Result, SpaError};
use tracing::debug;

/// Check the attached identity against the policy declared for `endpoint`.
///
/// Returns the identity for the handler's own use on success. A policy with
/// `required == false` never triggers role or scope checks, even for an
/// anonymous identity.
pub fn authorize(
    registry: &PolicyRegistry,
    identity: &Identity,
    endpoint: &str,
) -> Result<Identity> {
    let policy = registry.lookup(endpoint);

    if !policy.required {
        return Ok(identity.clone());
    }

    if identity.is_anonymous() {
        debug!("Rejecting anonymous request to {}", endpoint);
        return Err(SpaError::Unauthenticated);
    }

    if let Some(minimum) = policy.minimum_role {
        if !identity.has_role(minimum) {
            debug!(
                "Rejecting {:?} for {}: role {:?} below minimum {:?}",
                identity.username(),
                endpoint,
                identity.role(),
                minimum
            );
            return Err(SpaError::InsufficientRole);
        }
    }

    let missing = identity.missing_scopes(&policy.scopes);
    if !missing.is_empty() {
        debug!(
            "Rejecting {:?} for {}: missing scopes {:?}",
            identity.username(),
            endpoint,
            missing
        );
        return Err(SpaError::MissingScopes(missing));
    }

    Ok(identity.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::identity::Role;
    use crate::auth::policy::EndpointPolicy;

    fn staff_identity(scopes: &[&str]) -> Identity {
        Identity::Authenticated {
            username: "sara".to_string(),
            role: Role::Staff,
            scopes: scopes.iter().map(|s| s.to_string()).collect(),
            full_name: Some("Sara Staff".to_string()),
        }
    }

    #[test]
    fn test_optional_policy_passes_anonymous_through() {
        let mut registry = PolicyRegistry::new();
        registry.declare("public.services", EndpointPolicy::public());

        let result = authorize(&registry, &Identity::Anonymous, "public.services").unwrap();
        assert!(result.is_anonymous());
    }

    #[test]
    fn test_required_policy_rejects_anonymous() {
        let registry = PolicyRegistry::new();
        let err = authorize(&registry, &Identity::Anonymous, "appointments.list").unwrap_err();
        assert!(matches!(err, SpaError::Unauthenticated));
    }

    #[test]
    fn test_role_below_minimum_rejected() {
        let mut registry = PolicyRegistry::new();
        registry.declare("staff.list", EndpointPolicy::min_role(Role::Manager));

        let err = authorize(&registry, &staff_identity(&[]), "staff.list").unwrap_err();
        assert!(matches!(err, SpaError::InsufficientRole));
    }

    #[test]
    fn test_missing_scopes_listed_exactly() {
        let mut registry = PolicyRegistry::new();
        registry.declare(
            "clients.create",
            EndpointPolicy::min_role(Role::Staff).with_scope("clients:write"),
        );

        let err = authorize(
            &registry,
            &staff_identity(&["clients:read"]),
            "clients.create",
        )
        .unwrap_err();
        match err {
            SpaError::MissingScopes(missing) => {
                assert_eq!(missing, vec!["clients:write".to_string()]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_undeclared_endpoint_uses_fail_secure_default() {
        let registry = PolicyRegistry::new();

        // An anonymous guest must not slip through an undeclared route
        assert!(matches!(
            authorize(&registry, &Identity::Anonymous, "never.declared"),
            Err(SpaError::Unauthenticated)
        ));

        // A staff identity satisfies the default minimum
        assert!(authorize(&registry, &staff_identity(&[]), "never.declared").is_ok());
    }

    #[test]
    fn test_success_returns_identity() {
        let mut registry = PolicyRegistry::new();
        registry.declare(
            "appointments.update_status",
            EndpointPolicy::min_role(Role::Staff).with_scope("appointments:write"),
        );

        let identity = staff_identity(&["appointments:write"]);
        let resolved =
            authorize(&registry, &identity, "appointments.update_status").unwrap();
        assert_eq!(resolved, identity);
    }

    #[test]
    fn test_authorize_is_idempotent() {
        let mut registry = PolicyRegistry::new();
        registry.declare("clients.list", EndpointPolicy::min_role(Role::Staff));
        let identity = staff_identity(&[]);

        let first = authorize(&registry, &identity, "clients.list");
        let second = authorize(&registry, &identity, "clients.list");
        assert_eq!(first.unwrap(), second.unwrap());

        let guest_first = authorize(&registry, &Identity::Anonymous, "clients.list");
        let guest_second = authorize(&registry, &Identity::Anonymous, "clients.list");
        assert!(matches!(guest_first, Err(SpaError::Unauthenticated)));
        assert!(matches!(guest_second, Err(SpaError::Unauthenticated)));
    }
}
