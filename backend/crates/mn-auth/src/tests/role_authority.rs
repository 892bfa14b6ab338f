use crate::tests::{SECRET, claims_with_role, create_test_token};
use crate::{AuthError, JwtValidator, RoleAuthority};

use mn_core::Role;

#[test]
fn given_self_declared_authority_when_resolving_then_declared_role_trusted() {
    let authority = RoleAuthority::self_declared();

    assert_eq!(authority.resolve(Some("manager"), None).unwrap(), Role::Manager);
    assert_eq!(authority.resolve(Some("client"), None).unwrap(), Role::Client);
    assert_eq!(authority.resolve(None, None).unwrap(), Role::Client);
    assert!(!authority.is_verified());
}

#[test]
fn given_verified_authority_when_token_missing_then_missing_token_error() {
    let authority = RoleAuthority::with_validator(JwtValidator::with_hs256(SECRET));

    let result = authority.resolve(Some("manager"), None);

    assert!(matches!(result, Err(AuthError::MissingToken { .. })));
}

#[test]
fn given_client_token_when_declaring_manager_then_claim_wins() {
    // Given
    let authority = RoleAuthority::with_validator(JwtValidator::with_hs256(SECRET));
    let token = create_test_token(&claims_with_role("client"), SECRET);

    // When
    let role = authority.resolve(Some("manager"), Some(&token)).unwrap();

    // Then
    assert_eq!(role, Role::Client);
}

#[test]
fn given_manager_bearer_header_when_resolved_then_manager() {
    let authority = RoleAuthority::with_validator(JwtValidator::with_hs256(SECRET));
    let token = create_test_token(&claims_with_role("manager"), SECRET);
    let header = format!("Bearer {token}");

    let role = authority.resolve_header(None, Some(&header)).unwrap();

    assert_eq!(role, Role::Manager);
}

#[test]
fn given_basic_auth_header_when_resolved_then_invalid_scheme() {
    let authority = RoleAuthority::with_validator(JwtValidator::with_hs256(SECRET));

    let result = authority.resolve_header(None, Some("Basic dXNlcjpwYXNz"));

    assert!(matches!(result, Err(AuthError::InvalidScheme { .. })));
}
