//! mn-cli library
//!
//! Exports the HTTP client for the control plane's management and proxy
//! surface.

pub(crate) mod client;

#[cfg(test)]
mod tests;

pub use client::{CliClientResult, Client, ClientError, DEFAULT_SERVER_URL, ROLE_HEADER};
