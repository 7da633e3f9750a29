//! Foundation types shared across the domain: errors and auth.

mod auth;
mod errors;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode};
