//! JWT token codec
//!
//! Issues and verifies the signed, expiring claim set carried by bearer
//! tokens. Verification failures are collapsed into a single uniform
//! [`SpaError::InvalidToken`] so callers cannot distinguish which check
//! failed; the detail is only logged.

use crate::auth::identity::{Identity, Role};
use crate::config::Settings;
use crate::utils::error::{Result, SpaError};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

/// Signed claim set embedded in every token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// Role as integer rank
    #[serde(default = "Claims::default_role")]
    pub role: Role,
    /// Granted scopes
    #[serde(default)]
    pub scopes: Vec<String>,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Issued at timestamp (seconds)
    pub iat: u64,
    /// Expiration timestamp (seconds)
    pub exp: u64,
}

impl Claims {
    fn default_role() -> Role {
        Role::Guest
    }
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        if claims.sub.is_empty() {
            return Identity::Anonymous;
        }
        Identity::Authenticated {
            username: claims.sub,
            role: claims.role,
            scopes: claims.scopes.into_iter().collect(),
            full_name: claims.full_name,
        }
    }
}

/// Token codec for issuing and verifying bearer tokens
#[derive(Clone)]
pub struct TokenCodec {
    /// Encoding key for signing tokens
    encoding_key: EncodingKey,
    /// Decoding key for verifying tokens
    decoding_key: DecodingKey,
    /// Signing algorithm
    algorithm: Algorithm,
    /// Token lifetime in seconds
    ttl: u64,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &self.algorithm)
            .field("ttl", &self.ttl)
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

impl TokenCodec {
    /// Create a codec from process-wide settings
    pub fn new(settings: &Settings) -> Result<Self> {
        let algorithm = Algorithm::from_str(&settings.jwt_algorithm).map_err(|_| {
            SpaError::config(format!("Unknown JWT algorithm: {}", settings.jwt_algorithm))
        })?;

        let secret = settings.jwt_secret.as_bytes();
        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm,
            ttl: settings.jwt_ttl_secs,
        })
    }

    /// Issue a signed token for a subject with the given role and scopes
    pub fn issue(
        &self,
        subject: &str,
        role: Role,
        scopes: &[String],
        full_name: Option<String>,
    ) -> Result<String> {
        let now = unix_now()?;
        let claims = Claims {
            sub: subject.to_string(),
            role,
            scopes: scopes.to_vec(),
            full_name,
            iat: now,
            exp: now + self.ttl,
        };

        let header = Header::new(self.algorithm);
        let token = encode(&header, &claims, &self.encoding_key)
            .map_err(|e| SpaError::internal(format!("Token signing failed: {}", e)))?;

        debug!("Issued token for subject: {}", subject);
        Ok(token)
    }

    /// Verify signature and expiry, returning the decoded claims
    ///
    /// Any failure mode maps to the uniform `InvalidToken`.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            warn!("Token verification failed: {}", e);
            SpaError::InvalidToken
        })?;

        debug!("Token verified for subject: {}", token_data.claims.sub);
        Ok(token_data.claims)
    }

    /// Configured token lifetime in seconds
    pub fn ttl(&self) -> u64 {
        self.ttl
    }
}

/// Extract the token from an `Authorization` header value
pub fn token_from_header(header_value: &str) -> Option<&str> {
    header_value.strip_prefix("Bearer ")
}

fn unix_now() -> Result<u64> {
    Ok(SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| SpaError::internal(format!("System time error: {}", e)))?
        .as_secs())
}
