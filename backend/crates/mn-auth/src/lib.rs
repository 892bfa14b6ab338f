pub mod claims;
pub mod error;
pub mod jwt_validator;
pub mod role_authority;

pub use claims::Claims;
pub use error::{AuthError, Result};
pub use jwt_validator::JwtValidator;
pub use role_authority::RoleAuthority;

#[cfg(test)]
mod tests;
