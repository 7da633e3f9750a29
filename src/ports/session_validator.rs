//! SessionValidator and TokenIssuer ports - token verification and issue.
//!
//! Keeping these behind traits keeps the HTTP middleware provider-agnostic;
//! the tests swap in a mock without touching the middleware.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, DomainError};

/// Port for validating a bearer token into an authenticated user.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validates the token and resolves the account it names.
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

/// An access token handed to a client after login.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub access_token: String,
    /// Lifetime in seconds.
    pub expires_in: u64,
}

/// Port for minting access tokens.
pub trait TokenIssuer: Send + Sync {
    /// Issues a token whose subject is the given username.
    fn issue(&self, username: &str) -> Result<IssuedToken, DomainError>;
}
