//! Authentication types for the domain layer.
//!
//! These types represent an authenticated user extracted from a validated
//! JWT. They have no provider dependencies - the `SessionValidator` port
//! populates them, so the token library can change without touching this
//! module.

use thiserror::Error;
use uuid::Uuid;

/// Authenticated user extracted from a validated token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// The unique user identifier.
    pub id: Uuid,

    /// Login name from the token's `sub` claim.
    pub username: String,

    /// User's email address.
    pub email: String,

    /// Display name if the user set one.
    pub full_name: Option<String>,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    ///
    /// Typically called by the `SessionValidator` adapter after the token
    /// has been verified and the account looked up.
    pub fn new(
        id: Uuid,
        username: impl Into<String>,
        email: impl Into<String>,
        full_name: Option<String>,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
            full_name,
        }
    }

    /// Returns the user's display name, falling back to the username.
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.username)
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The token signature or structure is invalid.
    #[error("Invalid token")]
    InvalidToken,

    /// The token has expired.
    #[error("Token expired")]
    TokenExpired,

    /// The token was valid but names an account that no longer exists.
    #[error("Unknown user")]
    UnknownUser,

    /// A backing service needed for validation was unavailable.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}
