use crate::{
    get_status, health, recover_service, simulate_failure, start_service, stop_service, to_order,
    to_product, to_product_item, to_user,
};

use mn_ws::AppState;

use std::path::Path;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};

/// Build the application router with all endpoints.
/// `static_dir` serves the operator console under `/static` with `/` as its index.
pub fn build_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let router = Router::new()
        // Domain proxy
        .route("/users/", get(to_user).post(to_user))
        .route("/users/{id}", get(to_user))
        .route("/orders/", get(to_order).post(to_order))
        .route("/orders/{id}", get(to_order).put(to_order))
        .route("/products/", get(to_product).post(to_product))
        .route("/products/{id}", get(to_product_item))
        .route("/products/{id}/purchase", post(to_product))
        // Management
        .route("/management/status", get(get_status))
        .route("/management/start/{name}", post(start_service))
        .route("/management/stop/{name}", post(stop_service))
        .route("/management/simulate_failure/{name}", post(simulate_failure))
        .route("/management/recover/{name}", post(recover_service))
        // ChatOps
        .route("/ws/chatops", get(mn_ws::handler))
        .route("/health", get(health::health_check));

    let router = match static_dir {
        Some(dir) => router
            .nest_service("/static", ServeDir::new(dir))
            .route_service("/", ServeFile::new(dir.join("index.html"))),
        None => router,
    };

    router.with_state(state).layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    )
}
