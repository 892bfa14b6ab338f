use crate::tests::{SECRET, claims_with_role, create_test_token};
use crate::{AuthError, JwtValidator};

use mn_core::Role;

#[test]
fn given_valid_token_when_validated_then_returns_claims() {
    let validator = JwtValidator::with_hs256(SECRET);
    let token = create_test_token(&claims_with_role("manager"), SECRET);

    let result = validator.validate(&token);

    assert!(result.is_ok());
    let validated = result.unwrap();
    assert_eq!(validated.sub, "operator-1");
    assert_eq!(validated.role(), Role::Manager);
}

#[test]
fn given_expired_token_when_validated_then_returns_token_expired_error() {
    let validator = JwtValidator::with_hs256(SECRET);
    let mut claims = claims_with_role("manager");
    claims.exp = chrono::Utc::now().timestamp() - 3600;
    let token = create_test_token(&claims, SECRET);

    let result = validator.validate(&token);

    assert!(matches!(result, Err(AuthError::TokenExpired { .. })));
}

#[test]
fn given_wrong_secret_when_validated_then_returns_decode_error() {
    let validator = JwtValidator::with_hs256(b"wrong-secret-key-at-least-32-by");
    let token = create_test_token(&claims_with_role("manager"), SECRET);

    let result = validator.validate(&token);

    assert!(matches!(result, Err(AuthError::JwtDecode { .. })));
}

#[test]
fn given_empty_role_claim_when_validated_then_invalid_claim() {
    let validator = JwtValidator::with_hs256(SECRET);
    let token = create_test_token(&claims_with_role(" "), SECRET);

    let result = validator.validate(&token);

    assert!(matches!(
        result,
        Err(AuthError::InvalidClaim { ref claim, .. }) if claim == "role"
    ));
}

#[test]
fn given_garbage_token_when_validated_then_decode_error_code() {
    let validator = JwtValidator::with_hs256(SECRET);

    let err = validator.validate("not.a.jwt").unwrap_err();

    assert_eq!(err.error_code(), "JWT_DECODE_FAILED");
}
