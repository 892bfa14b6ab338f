use crate::{AuthError, Claims, Result as AuthErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;
use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

/// Clock skew tolerated on `exp`/`nbf`, in seconds
const LEEWAY_SECS: u64 = 30;

/// Verifies operator tokens signed with the control plane's shared secret
pub struct JwtValidator {
    key: DecodingKey,
    rules: Validation,
}

impl JwtValidator {
    pub fn with_hs256(secret: &[u8]) -> Self {
        let mut rules = Validation::new(Algorithm::HS256);
        rules.leeway = LEEWAY_SECS;
        rules.validate_nbf = true;
        rules.set_required_spec_claims(&["exp", "sub"]);

        Self {
            key: DecodingKey::from_secret(secret),
            rules,
        }
    }

    /// Signature and expiry first, then the role-bearing claims
    #[track_caller]
    pub fn validate(&self, token: &str) -> AuthErrorResult<Claims> {
        let location = ErrorLocation::from(Location::caller());
        let claims = decode::<Claims>(token, &self.key, &self.rules)
            .map_err(|e| rejected(e, location))?
            .claims;

        claims.validate()?;
        Ok(claims)
    }
}

fn rejected(error: JwtError, location: ErrorLocation) -> AuthError {
    match error.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired { location },
        _ => AuthError::JwtDecode {
            source: error,
            location,
        },
    }
}
