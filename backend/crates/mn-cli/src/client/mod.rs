pub(crate) mod client;
pub(crate) mod error;

pub use client::{Client, DEFAULT_SERVER_URL, ROLE_HEADER};
pub use error::{ClientError, Result as CliClientResult};
