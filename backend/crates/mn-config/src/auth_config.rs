use crate::{ConfigError, ConfigErrorResult, DEFAULT_AUTH_ENABLED, MIN_JWT_SECRET_LENGTH};

use serde::Deserialize;

/// Role claims. When disabled, the role is self-declared by the caller.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub enabled: bool,
    /// HS256 shared secret
    pub jwt_secret: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enabled: DEFAULT_AUTH_ENABLED,
            jwt_secret: None,
        }
    }
}

impl AuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !self.enabled {
            return Ok(());
        }

        match &self.jwt_secret {
            None => Err(ConfigError::auth(
                "auth.enabled requires auth.jwt_secret to be set",
            )),
            Some(secret) if secret.len() < MIN_JWT_SECRET_LENGTH => Err(ConfigError::auth(
                format!(
                    "auth.jwt_secret must be at least {} characters, got {}",
                    MIN_JWT_SECRET_LENGTH,
                    secret.len()
                ),
            )),
            Some(_) => Ok(()),
        }
    }
}
