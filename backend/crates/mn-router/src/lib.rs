pub mod created_user;
pub mod metrics;
pub mod proxy_request;
pub mod proxy_response;
pub mod request_router;

pub use created_user::CreatedUser;
pub use metrics::RouterMetrics;
pub use proxy_request::ProxyRequest;
pub use proxy_response::ProxyResponse;
pub use request_router::{INSTANCE_FIELD, RequestRouter};
