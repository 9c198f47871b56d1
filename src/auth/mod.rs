//! Authentication and authorization core
//!
//! Token issuance and verification, the role/scope model, per-endpoint policy
//! declaration, and request-time enforcement. The middleware in
//! `server::middleware` attaches an [`Identity`] to every request; handlers
//! then call [`AuthSystem::authorize`] with their endpoint identifier.

pub mod authorizer;
pub mod identity;
pub mod jwt;
pub mod policy;

pub use identity::{Identity, Role};
pub use jwt::{Claims, TokenCodec};
pub use policy::{EndpointPolicy, PolicyRegistry};

use crate::config::Settings;
use crate::models::user::User;
use crate::utils::error::Result;
use actix_web::{HttpMessage, HttpRequest};
use tracing::info;

/// Main authentication system shared across handlers
///
/// Holds the token codec and the policy registry; both are immutable after
/// startup, so the system is freely shareable between concurrent requests.
#[derive(Debug)]
pub struct AuthSystem {
    /// Token codec
    codec: TokenCodec,
    /// Endpoint policy registry, populated at route-registration time
    policies: PolicyRegistry,
}

impl AuthSystem {
    /// Create the authentication system from settings and a populated registry
    pub fn new(settings: &Settings, policies: PolicyRegistry) -> Result<Self> {
        let codec = TokenCodec::new(settings)?;
        info!(
            "Authentication system initialized with {} declared policies",
            policies.len()
        );
        Ok(Self { codec, policies })
    }

    /// Issue a bearer token for an authenticated user record
    pub fn issue_token(&self, user: &User) -> Result<String> {
        self.codec
            .issue(&user.username, user.role, &user.scopes, user.full_name.clone())
    }

    /// Enforce the endpoint's declared policy against the request's identity
    ///
    /// Reads the identity attached by the middleware (anonymous if somehow
    /// absent) and returns it to the handler when access is granted.
    pub fn authorize(&self, req: &HttpRequest, endpoint: &str) -> Result<Identity> {
        let identity = current_identity(req);
        authorizer::authorize(&self.policies, &identity, endpoint)
    }

    /// Token codec accessor
    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// Policy registry accessor
    pub fn policies(&self) -> &PolicyRegistry {
        &self.policies
    }
}

/// The identity attached to this request by the authentication middleware
///
/// Anonymous when the middleware did not run for this path or attached
/// nothing.
pub fn current_identity(req: &HttpRequest) -> Identity {
    req.extensions()
        .get::<Identity>()
        .cloned()
        .unwrap_or(Identity::Anonymous)
}
