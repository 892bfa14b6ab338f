pub mod api;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;

#[cfg(test)]
mod tests;

pub use api::{
    error::{ApiError, Result as ApiResult},
    extractors::caller_role::CallerRole,
    management::{get_status, recover_service, simulate_failure, start_service, stop_service},
    management_response::ManagementResponse,
    proxy::{forward, to_order, to_product, to_product_item, to_user},
};

pub use crate::routes::build_router;
