//! Axum extractor for the caller's operator role

use crate::ApiError;

use mn_core::Role;
use mn_ws::AppState;

use std::future::Future;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

/// Header carrying the self-declared role when auth is disabled
pub const USER_ROLE_HEADER: &str = "user-role";

/// Role of the HTTP caller.
///
/// With auth enabled the role comes from the `Authorization: Bearer` token;
/// otherwise from the `user-role` header, defaulting to `client`.
pub struct CallerRole(pub Role);

impl FromRequestParts<AppState> for CallerRole {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let headers = &parts.headers;
            let declared = headers
                .get(USER_ROLE_HEADER)
                .and_then(|value| value.to_str().ok());
            let authorization = headers
                .get(AUTHORIZATION)
                .and_then(|value| value.to_str().ok());

            let role = state.authority.resolve_header(declared, authorization)?;
            log::debug!("Caller role: {}", role);

            Ok(CallerRole(role))
        }
    }
}
