//! User account model and token issuance bodies

use crate::auth::Role;
use serde::{Deserialize, Serialize};

/// A user account as exposed to the rest of the application
///
/// The directory keeps credentials internally; this record carries only what
/// token issuance needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub scopes: Vec<String>,
}

/// Credential payload for the token endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

/// Issued token response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}
