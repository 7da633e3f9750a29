//! HS256 JWT adapter implementing SessionValidator and TokenIssuer.
//!
//! Tokens carry the username in `sub` and an absolute expiry in `exp`.
//! Validation resolves the subject against the user repository, so a
//! token for a deleted account stops working immediately.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::domain::foundation::{AuthError, AuthenticatedUser, DomainError};
use crate::ports::{IssuedToken, SessionValidator, TokenIssuer, UserRepository};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Username of the token holder.
    sub: String,
    /// Expiry as a UNIX timestamp.
    exp: i64,
}

/// JWT issue/validate adapter.
pub struct JwtAuth {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiration_secs: u64,
    users: Arc<dyn UserRepository>,
}

impl JwtAuth {
    pub fn new(config: &AuthConfig, users: Arc<dyn UserRepository>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            expiration_secs: config.expiration_secs(),
            users,
        }
    }
}

impl TokenIssuer for JwtAuth {
    fn issue(&self, username: &str) -> Result<IssuedToken, DomainError> {
        let exp = Utc::now() + Duration::seconds(self.expiration_secs as i64);
        let claims = Claims {
            sub: username.to_string(),
            exp: exp.timestamp(),
        };

        let access_token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Token encoding failed: {}", e)))?;

        Ok(IssuedToken {
            access_token,
            expires_in: self.expiration_secs,
        })
    }
}

#[async_trait]
impl SessionValidator for JwtAuth {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::default()).map_err(
            |e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            },
        )?;

        let user = self
            .users
            .find_by_username(&data.claims.sub)
            .await
            .map_err(|e| AuthError::ServiceUnavailable(e.to_string()))?
            .ok_or(AuthError::UnknownUser)?;

        Ok(AuthenticatedUser::new(
            user.id,
            user.username,
            user.email,
            user.full_name,
        ))
    }
}
