//! Configuration management for the spa-manager API
//!
//! Settings are sourced from environment variables once at startup. A `.env`
//! file is honoured via `dotenvy` before the first read.

use crate::utils::error::{Result, SpaError};
use rand::Rng;
use rand::distributions::Alphanumeric;
use std::env;
use std::str::FromStr;
use tracing::{debug, warn};

/// Fallback JWT secret recognised as insecure by [`Settings::validate`].
const DEFAULT_JWT_SECRET: &str = "change-me!";

/// Application settings, read once at process startup and immutable afterwards
#[derive(Debug, Clone)]
pub struct Settings {
    /// Human-readable application name
    pub app_name: String,
    /// Bind host
    pub host: String,
    /// Bind port
    pub port: u16,
    /// Shared secret used to sign and verify tokens
    pub jwt_secret: String,
    /// Signing algorithm name (e.g. "HS256")
    pub jwt_algorithm: String,
    /// Token lifetime in seconds
    pub jwt_ttl_secs: u64,
    /// Name of the cookie carrying the token on browser flows
    pub token_cookie: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: "Spa Manager API".to_string(),
            host: "127.0.0.1".to_string(),
            port: 8000,
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            jwt_algorithm: "HS256".to_string(),
            jwt_ttl_secs: 3600,
            token_cookie: "spa_access_token".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let settings = Self {
            app_name: env_or("APP_NAME", defaults.app_name),
            host: env_or("HOST", defaults.host),
            port: env_parsed("PORT", defaults.port)?,
            jwt_secret: match env::var("JWT_SECRET_KEY") {
                Ok(secret) if !secret.is_empty() => secret,
                _ => {
                    warn!("JWT_SECRET_KEY not set, generating an ephemeral secret");
                    generate_secret()
                }
            },
            jwt_algorithm: env_or("JWT_ALGORITHM", defaults.jwt_algorithm),
            jwt_ttl_secs: env_parsed("JWT_TTL_SECS", defaults.jwt_ttl_secs)?,
            token_cookie: env_or("TOKEN_COOKIE", defaults.token_cookie),
        };

        settings.validate()?;
        debug!("Settings loaded from environment");
        Ok(settings)
    }

    /// Validate the settings
    ///
    /// Hard failures are reserved for values the server cannot start with;
    /// weak-but-workable values only produce warnings so the demo stays
    /// runnable out of the box.
    pub fn validate(&self) -> Result<()> {
        if jsonwebtoken::Algorithm::from_str(&self.jwt_algorithm).is_err() {
            return Err(SpaError::config(format!(
                "Unknown JWT algorithm: {}",
                self.jwt_algorithm
            )));
        }

        if self.jwt_ttl_secs == 0 {
            return Err(SpaError::config("JWT_TTL_SECS must be greater than 0"));
        }

        if self.token_cookie.is_empty() {
            return Err(SpaError::config("TOKEN_COOKIE cannot be empty"));
        }

        if self.jwt_secret == DEFAULT_JWT_SECRET {
            warn!("JWT secret uses the insecure default; set JWT_SECRET_KEY in production");
        } else if self.jwt_secret.len() < 32 {
            warn!("JWT secret is shorter than 32 characters; consider a stronger secret");
        }

        Ok(())
    }
}

fn env_or(key: &str, default: String) -> String {
    env::var(key).unwrap_or(default)
}

fn env_parsed<T: FromStr>(key: &str, default: T) -> Result<T> {
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| SpaError::config(format!("Invalid value for {}: {}", key, raw))),
        Err(_) => Ok(default),
    }
}

/// Generate a random alphanumeric secret for processes started without one.
/// Tokens issued by a previous process will not verify against it.
fn generate_secret() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_validate() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_unknown_algorithm_rejected() {
        let settings = Settings {
            jwt_algorithm: "HS9000".to_string(),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let settings = Settings {
            jwt_ttl_secs: 0,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_generated_secret_length() {
        let secret = generate_secret();
        assert_eq!(secret.len(), 64);
        assert_ne!(secret, generate_secret());
    }
}
