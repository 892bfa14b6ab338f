//! Domain proxy handlers. Each route names its collaborator; the request is
//! forwarded through the registry gate unchanged.

use crate::ApiResult;

use mn_router::{ProxyRequest, ProxyResponse};
use mn_ws::AppState;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, HeaderValue, Method, StatusCode, Uri, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use bytes::Bytes;

/// Forward one request to `service`; `attach_instance` marks the
/// load-balanced endpoint.
pub async fn forward(
    state: &AppState,
    service: &str,
    method: Method,
    uri: &Uri,
    headers: &HeaderMap,
    body: Bytes,
    attach_instance: bool,
) -> ApiResult<Response> {
    let path_and_query = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let mut request =
        ProxyRequest::new(service, method, path_and_query).with_body(body, content_type);
    if attach_instance {
        request = request.with_instance();
    }

    let response = state.commands.router.forward(request).await?;
    Ok(into_response(response))
}

fn into_response(proxied: ProxyResponse) -> Response {
    let status = StatusCode::from_u16(proxied.status).unwrap_or(StatusCode::BAD_GATEWAY);
    let mut response = (status, Body::from(proxied.body)).into_response();

    if let Some(content_type) = proxied
        .content_type
        .as_deref()
        .and_then(|value| HeaderValue::from_str(value).ok())
    {
        response.headers_mut().insert(CONTENT_TYPE, content_type);
    }

    response
}

/// `/users/...`
pub async fn to_user(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Response> {
    forward(&state, "user", method, &uri, &headers, body, false).await
}

/// `/orders/...`
pub async fn to_order(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Response> {
    forward(&state, "order", method, &uri, &headers, body, false).await
}

/// `/products/`, `/products/{id}/purchase`
pub async fn to_product(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Response> {
    forward(&state, "product", method, &uri, &headers, body, false).await
}

/// GET `/products/{id}`, the load-balanced endpoint
pub async fn to_product_item(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Response> {
    forward(&state, "product", method, &uri, &headers, body, true).await
}
