use crate::{AuthError, JwtValidator, Result as AuthErrorResult};

use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use mn_core::Role;

/// Decides the caller's role for both the HTTP surface and ChatOps.
///
/// With a validator the role comes only from a verified token claim. Without
/// one the caller's self-declared role is trusted.
#[derive(Clone, Default)]
pub struct RoleAuthority {
    validator: Option<Arc<JwtValidator>>,
}

impl RoleAuthority {
    pub fn self_declared() -> Self {
        Self { validator: None }
    }

    pub fn with_validator(validator: JwtValidator) -> Self {
        Self {
            validator: Some(Arc::new(validator)),
        }
    }

    pub fn is_verified(&self) -> bool {
        self.validator.is_some()
    }

    /// `declared` is the `role` query param or `user-role` header value
    #[track_caller]
    pub fn resolve(&self, declared: Option<&str>, token: Option<&str>) -> AuthErrorResult<Role> {
        let Some(validator) = &self.validator else {
            return Ok(declared.map(Role::parse).unwrap_or_default());
        };

        let token = token.ok_or_else(|| AuthError::MissingToken {
            location: ErrorLocation::from(Location::caller()),
        })?;
        let claims = validator.validate(token)?;

        if let Some(declared) = declared
            && Role::parse(declared) != claims.role()
        {
            log::debug!(
                "Ignoring declared role '{}' for {}; token grants '{}'",
                declared,
                claims.sub,
                claims.role
            );
        }

        Ok(claims.role())
    }

    /// Same as [`resolve`](Self::resolve) but takes a raw `Authorization` header
    #[track_caller]
    pub fn resolve_header(
        &self,
        declared: Option<&str>,
        authorization: Option<&str>,
    ) -> AuthErrorResult<Role> {
        let token = match authorization {
            Some(value) => Some(bearer_token(value)?),
            None => None,
        };
        self.resolve(declared, token)
    }
}

#[track_caller]
fn bearer_token(header: &str) -> AuthErrorResult<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AuthError::InvalidScheme {
            location: ErrorLocation::from(Location::caller()),
        })
}
