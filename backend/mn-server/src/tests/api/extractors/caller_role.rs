use crate::CallerRole;
use crate::tests::app_state;

use axum::extract::FromRequestParts;
use axum::http::Request;
use googletest::prelude::*;
use jsonwebtoken::{EncodingKey, Header, encode};
use mn_auth::{Claims, JwtValidator, RoleAuthority};
use mn_core::Role;

const SECRET: &[u8] = b"server-test-secret-at-least-32-bytes!";

fn parts(headers: &[(&str, &str)]) -> axum::http::request::Parts {
    let mut builder = Request::builder().uri("/management/start/user");
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    builder.body(()).unwrap().into_parts().0
}

fn token(role: &str) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: "operator-1".to_string(),
        role: role.to_string(),
        exp: now + 3600,
        iat: now,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET)).unwrap()
}

#[tokio::test]
async fn given_no_header_when_extracting_then_client() {
    // Given
    let state = app_state(RoleAuthority::self_declared());
    let mut parts = parts(&[]);

    // When
    let CallerRole(role) = CallerRole::from_request_parts(&mut parts, &state)
        .await
        .unwrap();

    // Then
    assert_that!(role, eq(Role::Client));
}

#[tokio::test]
async fn given_user_role_header_when_auth_disabled_then_declared_role_used() {
    // Given
    let state = app_state(RoleAuthority::self_declared());
    let mut parts = parts(&[("user-role", "manager")]);

    // When
    let CallerRole(role) = CallerRole::from_request_parts(&mut parts, &state)
        .await
        .unwrap();

    // Then
    assert_that!(role, eq(Role::Manager));
}

#[tokio::test]
async fn given_auth_enabled_when_only_header_declares_manager_then_rejected() {
    // Given
    let state = app_state(RoleAuthority::with_validator(JwtValidator::with_hs256(SECRET)));
    let mut parts = parts(&[("user-role", "manager")]);

    // When
    let result = CallerRole::from_request_parts(&mut parts, &state).await;

    // Then
    assert!(result.is_err());
}

#[tokio::test]
async fn given_auth_enabled_when_token_claims_client_then_header_ignored() {
    // Given
    let state = app_state(RoleAuthority::with_validator(JwtValidator::with_hs256(SECRET)));
    let bearer = format!("Bearer {}", token("client"));
    let mut parts = parts(&[("user-role", "manager"), ("authorization", bearer.as_str())]);

    // When
    let CallerRole(role) = CallerRole::from_request_parts(&mut parts, &state)
        .await
        .unwrap();

    // Then
    assert_that!(role, eq(Role::Client));
}
