pub mod error;
pub mod extractors;
pub mod management;
pub mod management_response;
pub mod proxy;
